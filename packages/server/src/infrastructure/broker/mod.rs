pub mod rabbit;

pub use rabbit::{BrokerConfig, RabbitBroker};
