use faso_guide::application::{ChatService, SettingsPatch};
use faso_guide::domain::{Conversation, MessageRole};
use faso_guide::infrastructure::{build_chat_service, AppConfig};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SUGGESTIONS: &[&str] = &[
    "Quels sont les sites touristiques incontournables ?",
    "Où dormir à Ouagadougou ?",
    "Que peut-on manger au Burkina Faso ?",
    "Quelle est la meilleure période pour visiter ?",
    "Comment se déplacer dans le pays ?",
    "Combien coûte un séjour touristique ?",
];

const HELP: &str = "Commandes : /reset (recharger la base), /clear (effacer la conversation), \
/count, /debug, /stats, /suggestions, /quit";

enum Command {
    Reset,
    Clear,
    Count,
    Debug,
    Stats,
    Suggestions,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line {
            "/reset" => Some(Self::Reset),
            "/clear" => Some(Self::Clear),
            "/count" => Some(Self::Count),
            "/debug" => Some(Self::Debug),
            "/stats" => Some(Self::Stats),
            "/suggestions" => Some(Self::Suggestions),
            "/help" => Some(Self::Help),
            "/quit" | "/exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repl=info,faso_guide=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load()?;
    let chatbot = build_chat_service(&config).await?;
    let indexed = chatbot.load().await?;
    info!(indexed, "Knowledge base ready");

    println!("🌍 Assistant touristique du Burkina Faso");
    println!("{HELP}\n");

    let mut conversation = Conversation::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("👉 ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Command::parse(line) {
            Some(Command::Quit) => break,
            Some(command) => run_command(command, &chatbot, &mut conversation).await?,
            None if line.starts_with('/') => println!("Commande inconnue. {HELP}"),
            None => {
                conversation.add_message(MessageRole::User, line);
                let answer = chatbot.chat(line).await;
                println!("\n{answer}\n");
                conversation.add_message(MessageRole::Assistant, answer);
            }
        }
    }

    println!("À bientôt !");
    Ok(())
}

async fn run_command(
    command: Command,
    chatbot: &ChatService,
    conversation: &mut Conversation,
) -> anyhow::Result<()> {
    match command {
        Command::Reset => {
            let count = chatbot.reset().await?;
            println!("✅ Base de données rechargée ({count} documents)");
        }
        Command::Clear => {
            conversation.clear();
            println!("✅ Conversation réinitialisée");
        }
        Command::Count => println!("📄 {} documents indexés", chatbot.count().await?),
        Command::Debug => {
            let debug = !chatbot.settings()?.debug;
            chatbot.update_settings(&SettingsPatch {
                debug: Some(debug),
                ..Default::default()
            })?;
            println!("🐛 Mode debug : {}", if debug { "activé" } else { "désactivé" });
        }
        Command::Stats => {
            let asked = conversation
                .messages
                .iter()
                .filter(|m| m.role == MessageRole::User)
                .count();
            println!(
                "💬 {asked} questions, 📄 {} documents",
                chatbot.count().await?
            );
        }
        Command::Suggestions => {
            for suggestion in SUGGESTIONS {
                println!("💬 {suggestion}");
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}
