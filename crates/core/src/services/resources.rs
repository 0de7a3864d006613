//! Cabins, rooms and psychologist assignments, all scoped to the owning admin.

use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        cabin::{
            AssignedPsychologist, Cabin, CabinDetail, CabinPsychologist, CreateCabinRequest,
            CreateRoomRequest, NewCabin, Room, UpdateCabinRequest, UpdateRoomRequest,
        },
        user::{Identity, Role},
    },
    policy::{self, Capability},
    repository::Store,
};

async fn resolve_owned_cabin(
    store: &dyn Store,
    identity: &Identity,
    cabin_id: Uuid,
) -> BookingResult<Cabin> {
    let cabin = store.find_cabin(cabin_id).await?;
    policy::owned_cabin(identity, cabin_id, cabin)
}

async fn cabin_detail(store: &dyn Store, cabin: Cabin) -> BookingResult<CabinDetail> {
    let rooms = store.list_rooms(cabin.id).await?;
    let psychologists = store.list_assignments(cabin.id).await?;
    Ok(CabinDetail::new(cabin, rooms, psychologists))
}

pub async fn create_cabin(
    store: &dyn Store,
    identity: &Identity,
    request: CreateCabinRequest,
) -> BookingResult<Cabin> {
    policy::authorize(identity, Capability::ManageCabins)?;
    request.validate()?;

    let cabin = store
        .create_cabin(&NewCabin {
            created_by: identity.user_id,
            name: request.name,
            location: request.location.filter(|location| !location.trim().is_empty()),
        })
        .await?;

    info!(cabin_id = %cabin.id, admin_id = %identity.user_id, "Cabin created");
    Ok(cabin)
}

/// Cabins created by the calling admin, with rooms and psychologists.
pub async fn list_cabins(store: &dyn Store, identity: &Identity) -> BookingResult<Vec<CabinDetail>> {
    policy::authorize(identity, Capability::ManageCabins)?;

    let cabins = store.list_cabins_by_owner(identity.user_id).await?;
    let mut details = Vec::with_capacity(cabins.len());
    for cabin in cabins {
        details.push(cabin_detail(store, cabin).await?);
    }
    Ok(details)
}

pub async fn get_cabin(
    store: &dyn Store,
    identity: &Identity,
    cabin_id: Uuid,
) -> BookingResult<CabinDetail> {
    policy::authorize(identity, Capability::ManageCabins)?;
    let cabin = resolve_owned_cabin(store, identity, cabin_id).await?;
    cabin_detail(store, cabin).await
}

pub async fn update_cabin(
    store: &dyn Store,
    identity: &Identity,
    cabin_id: Uuid,
    request: UpdateCabinRequest,
) -> BookingResult<Cabin> {
    policy::authorize(identity, Capability::ManageCabins)?;
    request.validate()?;

    let mut cabin = resolve_owned_cabin(store, identity, cabin_id).await?;
    request.apply(&mut cabin);
    store.update_cabin(&cabin).await
}

/// Removes the cabin along with its rooms, assignments and appointments.
pub async fn delete_cabin(store: &dyn Store, identity: &Identity, cabin_id: Uuid) -> BookingResult<()> {
    policy::authorize(identity, Capability::ManageCabins)?;
    resolve_owned_cabin(store, identity, cabin_id).await?;

    if !store.delete_cabin(cabin_id).await? {
        return Err(policy::cabin_not_found(cabin_id));
    }
    info!(%cabin_id, admin_id = %identity.user_id, "Cabin deleted");
    Ok(())
}

// Rooms

pub async fn create_room(
    store: &dyn Store,
    identity: &Identity,
    cabin_id: Uuid,
    request: CreateRoomRequest,
) -> BookingResult<Room> {
    policy::authorize(identity, Capability::ManageRooms)?;
    request.validate()?;

    let cabin = resolve_owned_cabin(store, identity, cabin_id).await?;
    store.create_room(cabin.id, &request.name).await
}

pub async fn list_rooms(store: &dyn Store, identity: &Identity, cabin_id: Uuid) -> BookingResult<Vec<Room>> {
    policy::authorize(identity, Capability::ManageRooms)?;
    let cabin = resolve_owned_cabin(store, identity, cabin_id).await?;
    store.list_rooms(cabin.id).await
}

fn room_not_found(room_id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Room with ID {} not found", room_id))
}

pub async fn get_room(
    store: &dyn Store,
    identity: &Identity,
    cabin_id: Uuid,
    room_id: Uuid,
) -> BookingResult<Room> {
    policy::authorize(identity, Capability::ManageRooms)?;
    let cabin = resolve_owned_cabin(store, identity, cabin_id).await?;
    store
        .find_room(cabin.id, room_id)
        .await?
        .ok_or_else(|| room_not_found(room_id))
}

pub async fn update_room(
    store: &dyn Store,
    identity: &Identity,
    cabin_id: Uuid,
    room_id: Uuid,
    request: UpdateRoomRequest,
) -> BookingResult<Room> {
    policy::authorize(identity, Capability::ManageRooms)?;
    request.validate()?;

    let cabin = resolve_owned_cabin(store, identity, cabin_id).await?;
    let mut room = store
        .find_room(cabin.id, room_id)
        .await?
        .ok_or_else(|| room_not_found(room_id))?;
    room.name = request.name;
    store.update_room(&room).await
}

pub async fn delete_room(
    store: &dyn Store,
    identity: &Identity,
    cabin_id: Uuid,
    room_id: Uuid,
) -> BookingResult<()> {
    policy::authorize(identity, Capability::ManageRooms)?;
    let cabin = resolve_owned_cabin(store, identity, cabin_id).await?;

    if !store.delete_room(cabin.id, room_id).await? {
        return Err(room_not_found(room_id));
    }
    Ok(())
}

// Assignments

/// Links a psychologist to a cabin.
///
/// A repeat of an existing (cabin, psychologist) pair is a validation error.
/// A psychologist already working in another cabin is refused by the store's
/// one-assignment-per-psychologist constraint with a conflict.
pub async fn assign_psychologist(
    store: &dyn Store,
    identity: &Identity,
    cabin_id: Uuid,
    psychologist_id: Uuid,
) -> BookingResult<CabinPsychologist> {
    policy::authorize(identity, Capability::ManageAssignments)?;
    let cabin = resolve_owned_cabin(store, identity, cabin_id).await?;

    let psychologist = store
        .find_user_with_role(psychologist_id, Role::Psychologist)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!(
                "Psychologist with ID {} not found or not a psychologist",
                psychologist_id
            ))
        })?;

    if store.assignment_exists(cabin.id, psychologist.id).await? {
        return Err(BookingError::Validation(
            "Psychologist is already assigned to this cabin".to_string(),
        ));
    }

    let assignment = store.create_assignment(cabin.id, psychologist.id).await?;
    info!(
        cabin_id = %cabin.id,
        psychologist_id = %psychologist.id,
        "Psychologist assigned to cabin"
    );
    Ok(assignment)
}

pub async fn list_assignments(
    store: &dyn Store,
    identity: &Identity,
    cabin_id: Uuid,
) -> BookingResult<Vec<AssignedPsychologist>> {
    policy::authorize(identity, Capability::ManageAssignments)?;
    let cabin = resolve_owned_cabin(store, identity, cabin_id).await?;
    store.list_assignments(cabin.id).await
}

pub async fn unassign_psychologist(
    store: &dyn Store,
    identity: &Identity,
    cabin_id: Uuid,
    psychologist_id: Uuid,
) -> BookingResult<()> {
    policy::authorize(identity, Capability::ManageAssignments)?;
    let cabin = resolve_owned_cabin(store, identity, cabin_id).await?;

    if !store.delete_assignment(cabin.id, psychologist_id).await? {
        return Err(BookingError::NotFound(format!(
            "Psychologist {} is not assigned to this cabin",
            psychologist_id
        )));
    }
    info!(cabin_id = %cabin.id, %psychologist_id, "Psychologist unassigned from cabin");
    Ok(())
}

/// The cabin a psychologist works in. Always `None` for admins.
pub async fn assigned_cabin(store: &dyn Store, identity: &Identity) -> BookingResult<Option<Uuid>> {
    match identity.role {
        Role::Admin => Ok(None),
        Role::Psychologist => Ok(store
            .find_assignment_for(identity.user_id)
            .await?
            .map(|assignment| assignment.cabin_id)),
    }
}
