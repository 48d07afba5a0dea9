//! Housing applications: one request per student per term, with a
//! pending → approved/rejected → assigned lifecycle. Status is a tagged
//! enum whose transition methods are the only way state changes.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{
    Application, ApplicationForm, ApplicationId, ApplicationStatus, ApplicationView, GuardianInfo,
    PersonalInfo, Preference, Review, Semester, TransitionError,
};
pub use repository::{ApplicationFilter, ApplicationRepository};
pub use service::ApplicationService;
