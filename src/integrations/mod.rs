pub mod image_gen;
pub mod mail;
pub mod pdf;
pub mod trivia;

pub use image_gen::{ImageGenerator, OpenAiImageClient};
pub use mail::{MailSender, SmtpMailSender};
pub use pdf::{DocumentTextExtractor, PdfTextExtractor};
pub use trivia::{OpenTdbClient, RawTriviaQuestion, TriviaProvider};
