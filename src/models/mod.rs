pub mod landmark;
pub mod notification;
pub mod saved_landmarks;
pub mod users;

pub use landmark::{Landmark, LandmarkLocation, LandmarkRow, NewLandmark};
pub use notification::{Notification, NotificationKind, NotificationRow};
pub use saved_landmarks::SavedLandmarkRow;
pub use users::{PendingVerificationRow, UserProfile, UsersRow};
