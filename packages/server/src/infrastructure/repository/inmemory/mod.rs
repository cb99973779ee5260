pub mod chat;

pub use chat::InMemoryChatRepository;
