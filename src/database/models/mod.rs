pub mod form;
pub mod question;
pub mod response;
pub mod user;

pub use form::{Form, FormTranslation};
pub use question::{Question, QuestionOption, QuestionTranslation};
pub use response::{Answer, Response};
pub use user::User;
