use clap::Parser;
use switch_client::config::cli::{parse_body, parse_method, Command, LogFormat};
use switch_client::utils::error::ErrorSeverity;
use switch_client::utils::{logger, validation::Validate};
use switch_client::{probe_all, CliConfig, ClientError, Reachability, ServiceRegistry};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        exit_with(&e);
    }
}

async fn run(cli: CliConfig) -> switch_client::Result<()> {
    // 載入並驗證配置
    let config = cli.registry_config()?;
    config.validate()?;

    let registry = ServiceRegistry::new(&config)?;

    match cli.command {
        Command::Endpoints => {
            for client in registry.iter() {
                println!("{:<13} {}", client.service(), client.base_url());
            }
        }
        Command::Call {
            service,
            path,
            method,
            data,
        } => {
            let method = parse_method(&method)?;
            let body = parse_body(data.as_deref())?;

            let client = registry.client(service);
            tracing::info!("📡 {} {}", method, client.url(&path));

            let response = client.send(method, &path, body.as_ref()).await?;
            tracing::info!("✅ {} ({} bytes)", response.status, response.body.len());
            match response.json::<serde_json::Value>() {
                Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                Err(_) => println!("{}", response.text()),
            }
        }
        Command::Probe { path } => {
            let reports = probe_all(&registry, &path).await;
            let offline = reports.iter().filter(|r| !r.is_online()).count();

            for report in &reports {
                match &report.reachability {
                    Reachability::Online { status } => println!(
                        "🟢 {:<13} {} ({}, {:?})",
                        report.service, report.url, status, report.elapsed
                    ),
                    Reachability::Offline { reason } => println!(
                        "🔴 {:<13} {} ({})",
                        report.service, report.url, reason
                    ),
                }
            }

            println!("{}/{} services online", reports.len() - offline, reports.len());
            if offline > 0 {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}

fn exit_with(e: &ClientError) -> ! {
    // 呼叫失敗的細節已由攔截器記錄
    if e.is_call_failure() {
        tracing::error!(
            "❌ Request failed (Category: {:?}, Severity: {:?})",
            e.category(),
            e.severity()
        );
    } else {
        tracing::error!(
            "❌ switch-client failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
    }

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
