use anyhow::Context;
use clap::{Parser, Subcommand};
use scanboard_core::client::http::HttpDashboardApi;
use scanboard_core::presenter::ranking::SortKey;
use scanboard_core::presenter::views::RecommendationTab;
use scanboard_core::session::{DashboardSession, LoadOutcome};
use scanboard_core::store::profile::{self, ProfileDraft};
use scanboard_core::store::{JsonFileStore, KeyValueStore, NoticeGate};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

const STORE_FILE_NAME: &str = "store.json";

#[derive(Debug, Parser)]
#[command(name = "scanboard")]
struct Args {
    /// Local preference store (JSON). Defaults to SCANBOARD_STORE_PATH, then the per-user data dir.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Latest scanner ranking.
    Scan {
        /// score | change
        #[arg(long, default_value = "score")]
        sort: SortKey,
    },
    /// Recommendation cards for a tab: active | needs-attention | archived.
    Recommendations {
        #[arg(default_value = "active")]
        tab: RecommendationTab,
    },
    /// This week's new / archived / repeated recommendations.
    Weekly,
    /// Hide or restore a notice.
    Notice {
        #[command(subcommand)]
        action: NoticeAction,
    },
    /// Save the auth token used for backend requests.
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the saved auth token.
    Logout,
    /// Manage the locally saved profile draft.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Debug, Subcommand)]
enum NoticeAction {
    Hide {
        id: String,
        #[arg(long, default_value_t = 7)]
        days: i64,
    },
    Reset {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum ProfileAction {
    Show,
    Save {
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        marketing_opt_in: bool,
    },
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = scanboard_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let store_path = resolve_store_path(args.store.clone(), &settings)?;
    let mut store = JsonFileStore::open(&store_path)?;

    let res = run(args.command, &settings, &mut store).await;
    if let Err(err) = &res {
        sentry_anyhow::capture_anyhow(err);
    }
    res
}

async fn run(
    command: Command,
    settings: &scanboard_core::config::Settings,
    store: &mut JsonFileStore,
) -> anyhow::Result<()> {
    match command {
        Command::Scan { sort } => {
            let session = open_session(settings, store)?;
            print_header(store)?;
            let view = expect_loaded(session.load_ranking(sort).await)?;
            print_lines(render::ranking(&view));
        }
        Command::Recommendations { tab } => {
            let session = open_session(settings, store)?;
            print_header(store)?;
            let view = expect_loaded(session.load_recommendations(tab).await)?;
            print_lines(render::recommendations(&view));
        }
        Command::Weekly => {
            let session = open_session(settings, store)?;
            print_header(store)?;
            let view = expect_loaded(session.load_weekly().await)?;
            print_lines(render::weekly(&view));
        }
        Command::Notice { action } => {
            let now = chrono::Utc::now();
            let mut gate = NoticeGate::new(store);
            match action {
                NoticeAction::Hide { id, days } => match gate.hide_for_days(&id, days, now)? {
                    Some(until) => {
                        tracing::info!(notice_id = %id, %until, "notice hidden");
                        println!("{id}: {}까지 숨김", until.format("%Y-%m-%d %H:%M UTC"));
                    }
                    None => println!("{id}: 다시 표시"),
                },
                NoticeAction::Reset { id } => {
                    gate.reset(&id)?;
                    println!("{id}: 다시 표시");
                }
            }
        }
        Command::Login { token } => {
            profile::save_auth_token(store, &token)?;
            tracing::info!(store = %store.path().display(), "auth token saved");
        }
        Command::Logout => {
            profile::clear_auth_token(store)?;
            tracing::info!("auth token cleared");
        }
        Command::Profile { action } => match action {
            ProfileAction::Show => match profile::load_profile_draft(&*store)? {
                Some(draft) if !draft.is_empty() => println!(
                    "{}",
                    serde_json::to_string_pretty(&draft).context("serialize profile draft failed")?
                ),
                _ => println!("저장된 프로필 초안이 없습니다"),
            },
            ProfileAction::Save {
                nickname,
                email,
                marketing_opt_in,
            } => {
                let existing = profile::load_profile_draft(&*store)?.unwrap_or_default();
                let draft = merge_draft(existing, nickname, email, marketing_opt_in);
                profile::save_profile_draft(store, &draft)?;
            }
            ProfileAction::Clear => profile::clear_profile_draft(store)?,
        },
    }

    Ok(())
}

fn resolve_store_path(
    flag: Option<PathBuf>,
    settings: &scanboard_core::config::Settings,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag.or_else(|| settings.store_path.clone()) {
        return Ok(path);
    }
    let dirs = directories::ProjectDirs::from("", "", "scanboard")
        .context("no home directory found; pass --store or set SCANBOARD_STORE_PATH")?;
    Ok(dirs.data_dir().join(STORE_FILE_NAME))
}

fn open_session(
    settings: &scanboard_core::config::Settings,
    store: &JsonFileStore,
) -> anyhow::Result<DashboardSession<HttpDashboardApi>> {
    let api = HttpDashboardApi::from_settings(settings)?
        .with_token(profile::load_auth_token(store)?.as_deref())?;
    Ok(DashboardSession::new(api))
}

fn print_header<S: KeyValueStore>(store: &mut S) -> anyhow::Result<()> {
    let now = chrono::Utc::now();
    println!("{} (KST)", scanboard_core::time::today_kst(now)?);
    if NoticeGate::new(store).is_visible(render::DISCLAIMER_NOTICE_ID, now)? {
        println!("※ {}", render::DISCLAIMER_TEXT);
    }
    println!();
    Ok(())
}

fn expect_loaded<T>(outcome: LoadOutcome<T>) -> anyhow::Result<T> {
    match outcome {
        LoadOutcome::Loaded(view) => Ok(view),
        LoadOutcome::AlreadyLoading => anyhow::bail!("view is already loading"),
        LoadOutcome::Failed(banner) => {
            for line in render::banner(&banner) {
                eprintln!("{line}");
            }
            Err(anyhow::anyhow!(banner.detail)).context(banner.message)
        }
    }
}

fn merge_draft(
    mut draft: ProfileDraft,
    nickname: Option<String>,
    email: Option<String>,
    marketing_opt_in: bool,
) -> ProfileDraft {
    if nickname.is_some() {
        draft.nickname = nickname;
    }
    if email.is_some() {
        draft.email = email;
    }
    draft.marketing_opt_in = marketing_opt_in;
    draft
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

fn init_sentry(settings: &scanboard_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let args = Args::parse_from(["scanboard", "scan", "--sort", "change"]);
        assert!(matches!(args.command, Command::Scan { sort: SortKey::Change }));

        let args = Args::parse_from(["scanboard", "scan"]);
        assert!(matches!(args.command, Command::Scan { sort: SortKey::Score }));

        let args = Args::parse_from(["scanboard", "--store", "/tmp/s.json", "recommendations"]);
        assert_eq!(args.store, Some(PathBuf::from("/tmp/s.json")));
        assert!(matches!(
            args.command,
            Command::Recommendations { tab: RecommendationTab::Active }
        ));

        let args = Args::parse_from(["scanboard", "recommendations", "needs-attention"]);
        assert!(matches!(
            args.command,
            Command::Recommendations { tab: RecommendationTab::NeedsAttention }
        ));

        let args = Args::parse_from(["scanboard", "notice", "hide", "investment-disclaimer"]);
        assert!(matches!(
            args.command,
            Command::Notice { action: NoticeAction::Hide { days: 7, .. } }
        ));
    }

    #[test]
    fn rejects_unknown_sort_and_tab_at_parse_time() {
        assert!(Args::try_parse_from(["scanboard", "scan", "--sort", "volume"]).is_err());
        assert!(Args::try_parse_from(["scanboard", "recommendations", "trending"]).is_err());
    }

    #[test]
    fn store_path_prefers_flag_then_env_then_user_dir() {
        let mut settings = scanboard_core::config::Settings {
            store_path: Some(PathBuf::from("/env/store.json")),
            ..Default::default()
        };
        assert_eq!(
            resolve_store_path(Some(PathBuf::from("/flag.json")), &settings).unwrap(),
            PathBuf::from("/flag.json")
        );
        assert_eq!(
            resolve_store_path(None, &settings).unwrap(),
            PathBuf::from("/env/store.json")
        );

        settings.store_path = None;
        if let Ok(path) = resolve_store_path(None, &settings) {
            assert!(path.is_absolute());
            assert!(path.ends_with(STORE_FILE_NAME));
        }
    }

    #[test]
    fn merge_keeps_fields_not_given() {
        let draft = ProfileDraft {
            nickname: Some("a".to_string()),
            email: Some("a@example.com".to_string()),
            marketing_opt_in: true,
        };
        let merged = merge_draft(draft, None, Some("b@example.com".to_string()), false);
        assert_eq!(merged.nickname.as_deref(), Some("a"));
        assert_eq!(merged.email.as_deref(), Some("b@example.com"));
        assert!(!merged.marketing_opt_in);
    }

    #[tokio::test]
    async fn notice_hide_then_reset_round_trips_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let settings = scanboard_core::config::Settings::default();

        let mut store = JsonFileStore::open(&path).unwrap();
        run(
            Command::Notice {
                action: NoticeAction::Hide {
                    id: "n".to_string(),
                    days: 3,
                },
            },
            &settings,
            &mut store,
        )
        .await
        .unwrap();

        let mut reopened = JsonFileStore::open(&path).unwrap();
        assert!(!NoticeGate::new(&mut reopened)
            .is_visible("n", chrono::Utc::now())
            .unwrap());

        run(
            Command::Notice {
                action: NoticeAction::Reset { id: "n".to_string() },
            },
            &settings,
            &mut reopened,
        )
        .await
        .unwrap();
        assert!(NoticeGate::new(&mut reopened)
            .is_visible("n", chrono::Utc::now())
            .unwrap());
    }

    #[tokio::test]
    async fn login_then_logout() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("s.json")).unwrap();
        let settings = scanboard_core::config::Settings::default();

        run(Command::Login { token: "t0k".to_string() }, &settings, &mut store)
            .await
            .unwrap();
        assert_eq!(profile::load_auth_token(&store).unwrap().as_deref(), Some("t0k"));

        run(Command::Logout, &settings, &mut store).await.unwrap();
        assert_eq!(profile::load_auth_token(&store).unwrap(), None);
    }

    #[tokio::test]
    async fn view_commands_require_backend_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("s.json")).unwrap();
        let settings = scanboard_core::config::Settings::default();

        let err = run(Command::Weekly, &settings, &mut store).await.unwrap_err();
        assert!(err.to_string().contains("DASHBOARD_API_BASE_URL"));
    }
}
