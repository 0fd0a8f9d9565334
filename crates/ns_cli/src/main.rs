use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ns_core::{
    ArticleSource, LanguageCode, NoticeBuffer, NoticeLevel, SpeechSynthesizer, SynthesisRequest,
    VoiceGender,
};
use ns_inference::{create_scorer, SentimentClassifier};
use ns_news::{fetch_category, init_logging, NewsApiClient, NewsConfig};
use ns_secrets::{create_provider, Credentials, SecretNames, SecretsConfig, SecretsKind};
use ns_speech::{create_google_tts, default_language, GoogleTts, LanguageCatalog, SpeechConfig};
use ns_web::{create_app, AppState};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "NewsSphere: headlines with sentiment and text-to-speech", long_about = None)]
pub struct Cli {
    /// Where API_KEY and GCP_SERVICE_ACCOUNT are read from
    #[arg(long, value_enum, env = "NEWSSPHERE_SECRETS", default_value = "env")]
    secrets: SecretsKind,
    #[arg(long, env = "NEWSSPHERE_SECRETS_FILE", default_value = ns_secrets::backends::file::DEFAULT_SECRETS_FILE)]
    secrets_file: PathBuf,
    #[arg(long, env = "NEWSSPHERE_GCP_PROJECT")]
    gcp_project: Option<String>,
    #[arg(long, env = "NEWSSPHERE_COUNTRY", default_value = "us")]
    country: String,
    #[arg(long, env = "NEWSSPHERE_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,
    #[arg(long, env = "NEWSSPHERE_NEWS_BASE_URL", default_value = ns_news::client::DEFAULT_BASE_URL)]
    news_base_url: String,
    #[arg(long, env = "NEWSSPHERE_TTS_BASE_URL", default_value = ns_speech::google::DEFAULT_BASE_URL)]
    tts_base_url: String,
    #[arg(long, env = "NEWSSPHERE_SCORER", default_value = "lexicon", help = "Sentiment scorer: lexicon (default) or fixed:<score>")]
    scorer: String,
    #[arg(long, env = "NEWSSPHERE_LOG_LEVEL", default_value = "info")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the dashboard
    Serve {
        #[arg(long, env = "NEWSSPHERE_BIND", default_value = "127.0.0.1:8501")]
        bind: SocketAddr,
    },
    /// Print the top headlines of a category with their sentiment
    Headlines {
        #[arg(long, default_value = "general")]
        category: String,
        /// Technology sub-domain: blockchain, ai, data-science, quantum-computing, robotics or bioinformatics
        #[arg(long)]
        domain: Option<String>,
    },
    /// List the languages speech can be synthesized in
    Languages,
    /// Convert text to an MP3 file
    Speak {
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "en-US")]
        language: String,
        #[arg(long, default_value = "neutral")]
        gender: String,
        #[arg(long)]
        output: PathBuf,
    },
}

impl Cli {
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn secrets_config(&self) -> SecretsConfig {
        SecretsConfig {
            kind: self.secrets,
            file: self.secrets_file.clone(),
            project: self.gcp_project.clone(),
            timeout: self.timeout(),
            ..SecretsConfig::default()
        }
    }

    fn news_config(&self) -> NewsConfig {
        NewsConfig {
            base_url: self.news_base_url.clone(),
            country: self.country.clone(),
            timeout: self.timeout(),
        }
    }

    fn speech_config(&self) -> SpeechConfig {
        SpeechConfig {
            base_url: self.tts_base_url.clone(),
            timeout: self.timeout(),
        }
    }
}

struct Services {
    news: Arc<NewsApiClient>,
    tts: Arc<GoogleTts>,
    classifier: SentimentClassifier,
}

async fn build_services(cli: &Cli) -> anyhow::Result<Services> {
    let provider = create_provider(&cli.secrets_config()).context("Failed to open secret store")?;
    info!("🔐 Reading credentials (using {})", provider.name());
    let credentials = Credentials::load(provider.as_ref(), &SecretNames::default())
        .await
        .context("Failed to load credentials")?;

    let news = Arc::new(NewsApiClient::new(credentials.news_api_key, cli.news_config())?);
    info!("📰 News client initialized successfully (using {})", news.name());

    let tts = create_google_tts(credentials.service_account, cli.speech_config())?;
    info!("🔊 Text-to-Speech client initialized successfully");

    let classifier = SentimentClassifier::new(create_scorer(&cli.scorer)?);
    info!(
        "🧠 Sentiment model initialized successfully (using {})",
        classifier.scorer_name()
    );

    Ok(Services {
        news,
        tts,
        classifier,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env file: {}", e);
        }
    }
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let services = build_services(&cli).await?;

    match cli.command {
        Commands::Serve { bind } => {
            let app = create_app(AppState {
                articles: services.news,
                classifier: services.classifier,
                languages: LanguageCatalog::new(services.tts.clone()),
                synthesizer: services.tts,
            });
            ns_web::serve(app, bind).await?;
        }
        Commands::Headlines { category, domain } => {
            let notices = NoticeBuffer::new();
            let (topic, articles) = fetch_category(
                services.news.as_ref(),
                &category,
                domain.as_deref(),
                &notices,
            )
            .await?;
            for notice in notices.take() {
                match notice.level {
                    NoticeLevel::Error => warn!("❌ {}", notice.message),
                    NoticeLevel::Warning => warn!("⚠️ {}", notice.message),
                }
            }
            println!("📰 {} News ({} articles)", topic.label(), articles.len());
            for article in &articles {
                println!();
                println!("{}", article.title);
                println!("  {}", article.display_description());
                println!("  Source: {}", article.source_name);
                println!("  Sentiment: {}", services.classifier.classify_article(article));
                println!("  {}", article.url);
            }
        }
        Commands::Languages => {
            let catalog = LanguageCatalog::new(services.tts);
            let languages = catalog.supported_languages().await?;
            let default = default_language(&languages).cloned();
            for language in &languages {
                if Some(language) == default.as_ref() {
                    println!("{} (default)", language);
                } else {
                    println!("{}", language);
                }
            }
        }
        Commands::Speak {
            text,
            language,
            gender,
            output,
        } => {
            let request = SynthesisRequest {
                text,
                language: LanguageCode::new(language),
                gender: gender.parse::<VoiceGender>()?,
            };
            let audio = services.tts.synthesize(&request).await?;
            tokio::fs::write(&output, &audio.bytes)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("💾 Wrote {} bytes of audio to {}", audio.bytes.len(), output.display());
        }
    }

    Ok(())
}
