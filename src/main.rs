//! Budget Intake - terminal front end
//!
//! Runs one intake conversation over stdin/stdout.
//!
//! ```text
//! budget-intake [ACCOUNT_ID]
//! ```
//!
//! The account defaults to `BUDGET_INTAKE_ACCOUNT`, then `local`. An open
//! conversation for the account is resumed and its transcript replayed. Type
//! `/history` to print the transcript, `/reset` to start over, `/quit` to
//! leave. Ctrl-C cancels any in-flight model call and exits.

use std::error::Error;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::watch;

use budget_intake::adapters::memory::InMemoryStore;
use budget_intake::adapters::postgres::{
    self, PostgresConversationRepository, PostgresMessageRepository,
};
use budget_intake::adapters::{MockAIProvider, OpenAIConfig, OpenAIProvider};
use budget_intake::application::{
    BudgetGenerator, ConversationError, GatewayConfig, GetHistoryHandler, GetHistoryQuery,
    ModelGateway, OpenSession, ResetConversationCommand, ResetConversationHandler,
    StartConversationCommand, StartConversationHandler, SubmitTurnCommand, SubmitTurnHandler,
};
use budget_intake::config::{AiConfig, AiProvider, AppConfig};
use budget_intake::domain::conversation::Role;
use budget_intake::domain::foundation::{AccountId, SessionToken};
use budget_intake::ports::{AIProvider, ConversationRepository, MessageRepository};
use budget_intake::telemetry;

type BoxError = Box<dyn Error + Send + Sync>;

struct Repositories {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
}

struct Handlers {
    start: Arc<StartConversationHandler>,
    submit: SubmitTurnHandler,
    history: GetHistoryHandler,
    reset: ResetConversationHandler,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load_validated()?;
    telemetry::init_tracing(&config.logging)?;

    let account_id = AccountId::new(
        std::env::args()
            .nth(1)
            .or_else(|| std::env::var("BUDGET_INTAKE_ACCOUNT").ok())
            .unwrap_or_else(|| "local".to_string()),
    )?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            let _ = shutdown_tx.send(true);
        }
    });

    let repositories = repositories(&config).await?;
    let provider = provider(&config.ai)?;
    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "Model provider ready");
    let gateway = Arc::new(
        ModelGateway::new(provider, GatewayConfig::from(&config.ai)).with_shutdown(shutdown_rx.clone()),
    );
    let handlers = handlers(&config, repositories, gateway);

    run(&handlers, account_id, shutdown_rx).await
}

async fn repositories(config: &AppConfig) -> Result<Repositories, BoxError> {
    match &config.database {
        Some(database) => {
            let pool = postgres::connect(database).await?;
            if database.run_migrations {
                postgres::run_migrations(&pool).await?;
            }
            tracing::info!("Using PostgreSQL storage");
            Ok(Repositories {
                conversations: Arc::new(PostgresConversationRepository::new(pool.clone())),
                messages: Arc::new(PostgresMessageRepository::new(pool)),
            })
        }
        None => {
            tracing::info!("No database configured, using in-memory storage");
            let store = InMemoryStore::new();
            Ok(Repositories {
                conversations: Arc::new(store.conversations()),
                messages: Arc::new(store.messages()),
            })
        }
    }
}

fn provider(config: &AiConfig) -> Result<Arc<dyn AIProvider>, BoxError> {
    match config.provider {
        AiProvider::OpenAI => {
            let api_key = config
                .openai_api_key
                .as_ref()
                .map(|key| key.expose_secret().clone())
                .unwrap_or_default();
            let openai = OpenAIConfig::new(api_key)
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout());
            Ok(Arc::new(OpenAIProvider::new(openai)?))
        }
        AiProvider::Mock => {
            tracing::warn!("Using scripted offline model provider");
            Ok(Arc::new(MockAIProvider::offline()))
        }
    }
}

fn handlers(config: &AppConfig, repos: Repositories, gateway: Arc<ModelGateway>) -> Handlers {
    let start = Arc::new(StartConversationHandler::new(
        repos.conversations.clone(),
        repos.messages.clone(),
        gateway.clone(),
    ));
    let generator = BudgetGenerator::new(
        repos.conversations.clone(),
        gateway.clone(),
        config.intake.rounding_interval,
    );
    Handlers {
        submit: SubmitTurnHandler::new(
            repos.conversations.clone(),
            repos.messages.clone(),
            gateway,
            generator,
            &config.intake,
        ),
        history: GetHistoryHandler::new(repos.conversations.clone(), repos.messages),
        reset: ResetConversationHandler::new(repos.conversations, start.clone()),
        start,
    }
}

async fn run(
    handlers: &Handlers,
    account_id: AccountId,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), BoxError> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let session = handlers
        .start
        .resume_or_start(StartConversationCommand::new(account_id))
        .await?;
    let mut token: SessionToken = session.session_token();
    match session {
        OpenSession::Started(started) => say(&mut stdout, &started.greeting).await?,
        OpenSession::Resumed { .. } => {
            say(&mut stdout, "(lanjut dari obrolan sebelumnya, ketik /reset buat mulai ulang)").await?;
            print_history(handlers, token, &mut stdout).await?;
        }
    }

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            _ = shutdown.changed() => break,
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break,
            },
        };

        match line.trim() {
            "" => continue,
            "/quit" => break,
            "/history" => print_history(handlers, token, &mut stdout).await?,
            "/reset" => {
                let restarted = handlers
                    .reset
                    .handle(ResetConversationCommand::new(token))
                    .await?;
                token = restarted.session_token;
                say(&mut stdout, &restarted.greeting).await?;
            }
            text => match handlers.submit.handle(SubmitTurnCommand::new(token, text)).await {
                Ok(turn) => {
                    say(&mut stdout, &turn.reply).await?;
                    if turn.completed {
                        break;
                    }
                }
                Err(err) => match err.user_reply() {
                    Some(reply) => say(&mut stdout, reply).await?,
                    None if matches!(err, ConversationError::EmptyMessage) => continue,
                    None => return Err(err.into()),
                },
            },
        }

        if *shutdown.borrow() {
            break;
        }
    }

    Ok(())
}

async fn print_history(
    handlers: &Handlers,
    token: SessionToken,
    stdout: &mut tokio::io::Stdout,
) -> Result<(), BoxError> {
    let history = handlers.history.handle(GetHistoryQuery::new(token)).await?;
    for message in history {
        let label = match message.role {
            Role::User => "kamu",
            Role::Assistant => "aira",
        };
        say(stdout, &format!("[{}] {}", label, message.content)).await?;
    }
    Ok(())
}

async fn say(stdout: &mut tokio::io::Stdout, text: &str) -> std::io::Result<()> {
    stdout.write_all(format!("{}\n", text).as_bytes()).await?;
    stdout.flush().await
}
