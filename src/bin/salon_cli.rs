//!
//! salon CLI binary
//! -----------------
//! Command-line client for the salon backend. Runs the same pipeline, session store
//! and route guard as the front-ends, with the session persisted to a local file so
//! a login survives between invocations.

use std::env;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::Method;
use serde_json::Value;

use salon_client::config::{ClientConfig, Frontend};
use salon_client::identity::{self, Credentials, SessionStore, WechatConfig};
use salon_client::pipeline::{expiry_channel, ApiClient, Endpoint, ExpiryDispatcher, TracingNavigator};
use salon_client::router::Router;
use salon_client::storage::FileStore;
use salon_client::api;

const DEFAULT_SESSION_FILE: &str = ".salon_session.json";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [flags] <command> [args]\n\nFlags:\n  --frontend <name>        admin | customer | staff | store (env: SALON_FRONTEND, default admin)\n  --origin <url>           Backend origin (env: SALON_API_ORIGIN, default {origin})\n  --session-file <path>    Where the session is kept (default {file})\n  --timeout-ms <n>         Request timeout (env: SALON_TIMEOUT_MS, default 10000)\n  -h, --help               Show this help\n\nCommands:\n  login <username> [password]      sign in and store the session\n  logout                           sign out and clear the stored session\n  whoami                           show the stored session\n  call <METHOD> <path> [json]      send one request through the pipeline and print the envelope\n  export-payments <out-file>       download the admin payment export\n  route <path>                     resolve a navigation against the route guard\n  wechat-url <current-url>         print the WeChat authorize URL (SALON_WECHAT_APP_ID)\n\nLogging is controlled with RUST_LOG (default info).",
        program = program,
        origin = ClientConfig::DEFAULT_ORIGIN,
        file = DEFAULT_SESSION_FILE,
    );
}

struct Options {
    frontend: Option<String>,
    origin: Option<String>,
    session_file: String,
    timeout_ms: Option<u64>,
    command: Vec<String>,
}

fn parse_args(program: &str, args: &[String]) -> Result<Options> {
    let mut opts = Options {
        frontend: None,
        origin: None,
        session_file: DEFAULT_SESSION_FILE.to_string(),
        timeout_ms: None,
        command: Vec::new(),
    };
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let needs_value = matches!(flag, "--frontend" | "--origin" | "--session-file" | "--timeout-ms");
        if needs_value && i + 1 >= args.len() {
            print_usage(program);
            bail!("{} requires a value", flag);
        }
        match flag {
            "--frontend" => opts.frontend = Some(args[i + 1].clone()),
            "--origin" => opts.origin = Some(args[i + 1].clone()),
            "--session-file" => opts.session_file = args[i + 1].clone(),
            "--timeout-ms" => {
                let ms = args[i + 1].parse::<u64>().with_context(|| format!("invalid --timeout-ms '{}'", args[i + 1]))?;
                opts.timeout_ms = Some(ms);
            }
            "-h" | "--help" => {
                print_usage(program);
                std::process::exit(0);
            }
            _ => {
                opts.command = args[i..].to_vec();
                break;
            }
        }
        i += 2;
    }
    Ok(opts)
}

fn build_config(opts: &Options) -> Result<ClientConfig> {
    let mut cfg = match &opts.frontend {
        Some(name) => {
            let frontend: Frontend = name.parse()?;
            let mut cfg = ClientConfig::preset(frontend);
            cfg.apply_env()?;
            cfg
        }
        None => ClientConfig::from_env()?,
    };
    if let Some(origin) = &opts.origin {
        cfg.origin = origin.clone();
    }
    if let Some(ms) = opts.timeout_ms {
        cfg.timeout_ms = ms;
    }
    Ok(cfg)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);
    let opts = parse_args(&program, &args)?;
    if opts.command.is_empty() {
        print_usage(&program);
        std::process::exit(2);
    }

    let config = build_config(&opts)?;
    let storage = FileStore::open(&opts.session_file)
        .with_context(|| format!("failed to open session file {}", opts.session_file))?;
    let session = Arc::new(SessionStore::for_config(Arc::new(storage), &config));
    session.init();

    let (expiry_tx, expiry_rx) = expiry_channel();
    let dispatcher = ExpiryDispatcher::new(Arc::new(TracingNavigator), config.login_path.clone()).spawn(expiry_rx);
    let client = ApiClient::builder(config.clone(), session.clone()).expiry(expiry_tx).build()?;

    let result = run(&opts.command, &config, &client, &session).await;

    // Dropping the last sender lets the dispatcher drain and exit.
    drop(client);
    let dispatcher = dispatcher.await.context("expiry dispatcher panicked")?;
    if dispatcher.redirects() > 0 {
        eprintln!("session expired; run `{} login` again", program);
    }
    result
}

fn arg<'a>(command: &'a [String], i: usize, what: &str) -> Result<&'a String> {
    command.get(i).ok_or_else(|| anyhow!("{} requires {}", command[0], what))
}

async fn run(command: &[String], config: &ClientConfig, client: &ApiClient, session: &Arc<SessionStore>) -> Result<()> {
    match command[0].as_str() {
        "login" => {
            let username = arg(command, 1, "a username")?;
            let creds = match command.get(2) {
                Some(password) => Credentials::new(username.as_str(), password.as_str()),
                None => Credentials::phone(username.as_str()),
            };
            let user = session.try_login(client, &creds).await.context("login failed")?;
            println!("signed in as {}", user.username().unwrap_or(username.as_str()));
        }
        "logout" => {
            session.logout(client).await.context("failed to clear the stored session")?;
            println!("signed out");
        }
        "whoami" => {
            let snap = session.snapshot();
            if !session.is_logged_in() {
                println!("not signed in ({})", config.frontend);
                return Ok(());
            }
            println!("frontend: {}", config.frontend);
            println!("token:    {}", if snap.token.is_some() { "present" } else { "absent" });
            print_json(&serde_json::to_value(&snap.user)?)?;
            if let Some(member) = &snap.member {
                print_json(&serde_json::to_value(member)?)?;
            }
        }
        "call" => {
            let method = arg(command, 1, "an HTTP method")?;
            let path = arg(command, 2, "a path")?;
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("invalid method '{}'", method))?;
            let mut ep = Endpoint::new(method, path.as_str());
            if let Some(raw) = command.get(3) {
                let body: Value = serde_json::from_str(raw).context("request body is not valid JSON")?;
                ep = if ep.method == Method::GET { ep.query(&body)? } else { ep.json(&body)? };
            }
            let env = client.send(ep).await?;
            print_json(&serde_json::to_value(&env)?)?;
        }
        "export-payments" => {
            let out = arg(command, 1, "an output file")?;
            let resp = api::admin::payments::export_payments(client, &Value::Null).await?;
            let bytes = resp.bytes().await.context("failed to read export body")?;
            tokio::fs::write(out, &bytes).await.with_context(|| format!("failed to write {}", out))?;
            println!("wrote {} bytes to {}", bytes.len(), out);
        }
        "route" => {
            let path = arg(command, 1, "a path")?;
            let router = Router::for_config(config, session.clone());
            let nav = router.navigate(path)?;
            for hop in &nav.hops {
                println!("-> {}", hop);
            }
            println!("{} ({})", nav.resolved, nav.route.component);
            if let Some(title) = nav.title {
                println!("title: {}", title);
            }
        }
        "wechat-url" => {
            let current = arg(command, 1, "the current page url")?;
            println!("{}", identity::authorize_url(&WechatConfig::from_env(), current)?);
        }
        other => bail!("unknown command '{}'", other),
    }
    Ok(())
}
