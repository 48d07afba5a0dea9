//! In-memory repository implementations backing the service binary and the
//! test suites. Each store is a mutex-guarded map keyed by entity id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::applications::{Application, ApplicationFilter, ApplicationId, ApplicationRepository, Semester};
use crate::catalog::{Hostel, HostelId, HostelRepository};
use crate::error::RepositoryError;
use crate::identity::{Session, TokenStore, User, UserId, UserRepository};
use crate::rooms::{Room, RoomFilter, RoomId, RoomRepository};

#[derive(Default, Clone)]
pub struct MemoryUsers {
    records: Arc<Mutex<HashMap<UserId, User>>>,
}

impl UserRepository for MemoryUsers {
    fn insert(&self, user: User) -> Result<User, RepositoryError> {
        let mut guard = self.records.lock().expect("user mutex poisoned");
        if guard.contains_key(&user.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn update(&self, user: User) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("user mutex poisoned");
        if !guard.contains_key(&user.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(user.id.clone(), user);
        Ok(())
    }

    fn fetch(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let guard = self.records.lock().expect("user mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let guard = self.records.lock().expect("user mutex poisoned");
        Ok(guard.values().find(|user| user.email == email).cloned())
    }

    fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let guard = self.records.lock().expect("user mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub struct MemoryTokens {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl TokenStore for MemoryTokens {
    fn insert(&self, session: Session) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("token mutex poisoned");
        guard.insert(session.token.clone(), session);
        Ok(())
    }

    fn fetch(&self, token: &str) -> Result<Option<Session>, RepositoryError> {
        let guard = self.sessions.lock().expect("token mutex poisoned");
        Ok(guard.get(token).cloned())
    }

    fn revoke(&self, token: &str) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("token mutex poisoned");
        guard.remove(token);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MemoryHostels {
    records: Arc<Mutex<HashMap<HostelId, Hostel>>>,
}

impl HostelRepository for MemoryHostels {
    fn insert(&self, hostel: Hostel) -> Result<Hostel, RepositoryError> {
        let mut guard = self.records.lock().expect("hostel mutex poisoned");
        guard.insert(hostel.id.clone(), hostel.clone());
        Ok(hostel)
    }

    fn fetch(&self, id: &HostelId) -> Result<Option<Hostel>, RepositoryError> {
        let guard = self.records.lock().expect("hostel mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_by_name(&self, name: &str) -> Result<Option<Hostel>, RepositoryError> {
        let guard = self.records.lock().expect("hostel mutex poisoned");
        Ok(guard.values().find(|hostel| hostel.name == name).cloned())
    }

    fn list(&self) -> Result<Vec<Hostel>, RepositoryError> {
        let guard = self.records.lock().expect("hostel mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub struct MemoryRooms {
    records: Arc<Mutex<HashMap<RoomId, Room>>>,
}

impl RoomRepository for MemoryRooms {
    fn insert(&self, room: Room) -> Result<Room, RepositoryError> {
        let mut guard = self.records.lock().expect("room mutex poisoned");
        guard.insert(room.id.clone(), room.clone());
        Ok(room)
    }

    fn update(&self, room: Room) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("room mutex poisoned");
        if !guard.contains_key(&room.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(room.id.clone(), room);
        Ok(())
    }

    fn fetch(&self, id: &RoomId) -> Result<Option<Room>, RepositoryError> {
        let guard = self.records.lock().expect("room mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &RoomId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("room mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn list(&self, filter: &RoomFilter) -> Result<Vec<Room>, RepositoryError> {
        let guard = self.records.lock().expect("room mutex poisoned");
        Ok(guard
            .values()
            .filter(|room| match &filter.hostel {
                Some(hostel) => &room.hostel == hostel,
                None => true,
            })
            .filter(|room| !filter.available_only || room.is_available())
            .cloned()
            .collect())
    }

    fn find_by_number(
        &self,
        hostel: &HostelId,
        number: &str,
    ) -> Result<Option<Room>, RepositoryError> {
        let guard = self.records.lock().expect("room mutex poisoned");
        Ok(guard
            .values()
            .find(|room| &room.hostel == hostel && room.number == number)
            .cloned())
    }

    fn room_of(&self, student: &UserId) -> Result<Option<Room>, RepositoryError> {
        let guard = self.records.lock().expect("room mutex poisoned");
        Ok(guard
            .values()
            .find(|room| room.occupant_of(student).is_some())
            .cloned())
    }
}

#[derive(Default, Clone)]
pub struct MemoryApplications {
    records: Arc<Mutex<HashMap<ApplicationId, Application>>>,
}

impl ApplicationRepository for MemoryApplications {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        // Term uniqueness is enforced here, under the map lock, so two
        // concurrent submissions cannot both slip past a pre-check.
        let duplicate = guard.values().any(|existing| {
            existing.id == application.id
                || (existing.student == application.student
                    && existing.academic_year == application.academic_year
                    && existing.semester == application.semester)
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        if !guard.contains_key(&application.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(application.id.clone(), application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &ApplicationId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| match &filter.status {
                Some(status) => application.status.label() == status,
                None => true,
            })
            .filter(|application| match &filter.academic_year {
                Some(year) => &application.academic_year == year,
                None => true,
            })
            .cloned()
            .collect())
    }

    fn list_for(&self, student: &UserId) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| &application.student == student)
            .cloned()
            .collect())
    }

    fn find_for_term(
        &self,
        student: &UserId,
        academic_year: &str,
        semester: Semester,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .find(|application| {
                &application.student == student
                    && application.academic_year == academic_year
                    && application.semester == semester
            })
            .cloned())
    }

    fn assigned_to_room(&self, room: &RoomId) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| application.status.assigned_room() == Some(room))
            .cloned()
            .collect())
    }
}
