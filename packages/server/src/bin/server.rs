//! Room chat server over WebSocket with a RabbitMQ-backed message pipeline.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroma-server
//! cargo run --bin hiroma-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use hiroma_server::{
    config::ServerConfig,
    domain::{ChatRepository, IdentityResolver},
    engine::RoomRegistry,
    infrastructure::{
        auth::HttpIdentityResolver, broker::RabbitBroker, repository::InMemoryChatRepository,
    },
    ui::{AppState, Server},
    usecase::{
        AddMemberUseCase, ConnectParticipantUseCase, CreateRoomUseCase,
        DisconnectParticipantUseCase, GetRoomMessagesUseCase, GetUserRoomsUseCase,
        SendMessageUseCase,
    },
};
use hiroma_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroma-server")]
#[command(about = "Room-based chat backend with broker-decoupled fan-out", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = ServerConfig::from_env();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. Room registry
    // 3. Broker (publisher + supervised consumer)
    // 4. IdentityResolver
    // 5. UseCases
    // 6. AppState + Server

    // 1. Create Repository (in-memory database)
    let repository: Arc<dyn ChatRepository> = Arc::new(InMemoryChatRepository::new());

    // 2. Create the room engine registry
    let registry = Arc::new(RoomRegistry::new(Arc::clone(&repository)));

    // 3. Connect to the broker; dial exhaustion at startup is fatal
    let broker = match RabbitBroker::connect(&config.broker).await {
        Ok(broker) => Arc::new(broker),
        Err(err) => {
            tracing::error!(%err, "failed to connect to message broker");
            std::process::exit(1);
        }
    };
    if let Err(err) = broker.start_consumer(Arc::clone(&registry)).await {
        tracing::error!(%err, "failed to start broker consumer");
        std::process::exit(1);
    }

    // 4. Create the identity resolver for the external auth service
    let resolver: Arc<dyn IdentityResolver> =
        Arc::new(HttpIdentityResolver::new(config.auth_base_url.clone()));

    // 5. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        Arc::clone(&resolver),
        Arc::clone(&repository),
        Arc::clone(&registry),
    ));
    let disconnect_participant_usecase =
        Arc::new(DisconnectParticipantUseCase::new(Arc::clone(&registry)));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        Arc::clone(&broker) as Arc<dyn hiroma_server::domain::MessageBroker>
    ));
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(Arc::clone(&repository)));
    let add_member_usecase = Arc::new(AddMemberUseCase::new(Arc::clone(&repository)));
    let get_room_messages_usecase = Arc::new(GetRoomMessagesUseCase::new(Arc::clone(&repository)));
    let get_user_rooms_usecase = Arc::new(GetUserRoomsUseCase::new(Arc::clone(&repository)));

    // 6. Create and run the server
    let state = Arc::new(AppState {
        connect_participant_usecase,
        disconnect_participant_usecase,
        send_message_usecase,
        create_room_usecase,
        add_member_usecase,
        get_room_messages_usecase,
        get_user_rooms_usecase,
        resolver,
    });
    let server = Server::new(state, registry, broker);
    if let Err(err) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", err);
        std::process::exit(1);
    }
}
