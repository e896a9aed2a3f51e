pub mod chat;
pub mod club;
pub mod onboarding;
pub mod profile;
pub mod subscription;
pub mod verification;

pub use chat::{CallCountdown, ChatBubble, ChatLog, ChatMessage, Role, Sender, SupportLog};
pub use club::Club;
pub use onboarding::{FieldError, ProfileForm};
pub use profile::{Gender, Preference, Profile};
pub use subscription::SubscriptionPlan;
pub use verification::{VerificationFlow, VerificationStep};
