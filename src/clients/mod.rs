pub mod assistant_backend;
pub mod openai_assistants;

pub use assistant_backend::AssistantBackend;
pub use openai_assistants::OpenAiAssistants;
