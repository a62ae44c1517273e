pub mod assistant;
pub mod contact;
pub mod notifications;
pub mod profile;
pub mod prompts;
pub mod quiz;
pub mod quiz_store;
pub mod study_plan;

pub use assistant::StudyAssistant;
pub use notifications::NotificationStore;
pub use profile::ProfileService;
pub use quiz_store::QuizStore;
