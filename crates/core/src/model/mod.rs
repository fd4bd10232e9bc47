mod club;
mod faq;
mod fitness;
mod ids;
mod profile;
mod progress;
mod session_key;
mod training;

pub use ids::{ClubId, ExerciseId, ParseIdError, TrainingId};

pub use club::{Club, ClubDetail, ClubGroup, ClubMember};
pub use faq::{FaqCategory, FaqEntry, find_category};
pub use fitness::{
    FitnessError, FitnessExercise, FitnessResultDraft, FitnessResultEntry, FitnessSubmission,
};
pub use profile::{
    LegacyHours, LegacyHoursPayload, OngoingSemesterPayload,
    PLACEHOLDER_EMAIL, PLACEHOLDER_MEDICAL_GROUP, PLACEHOLDER_NAME, ProfilePayload,
    StudentFieldsPayload, StudentProfile,
};
pub use progress::ProgressRecord;
pub use session_key::{SessionKey, SessionKeyParts, SessionSlot, parse_session_key};
pub use training::Training;
