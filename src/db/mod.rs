pub mod appointment_repo;
pub mod car_repo;
pub mod evaluation_repo;
pub mod garage_repo;
pub mod role_repo;
pub mod service_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepository;
pub use car_repo::CarRepository;
pub use evaluation_repo::EvaluationRepository;
pub use garage_repo::GarageRepository;
pub use role_repo::RoleRepository;
pub use service_repo::ServiceRepository;
pub use user_repo::UserClientRepository;
