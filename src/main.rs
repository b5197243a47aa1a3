//src/main.rs

use std::process::ExitCode;

use antonieta_client::{
    config::{AppState, ClientConfig},
    handlers::{BeneficiariesPage, DashboardPage, LoginPage},
    models::route::Route,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "uso: antonieta-client <login EMAIL SENHA | logout | whoami | dashboard | beneficiaries>";

#[tokio::main]
async fn main() -> ExitCode {
    // Logger compacto; RUST_LOG sobrescreve o nível padrão
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    match run(std::env::args().skip(1).collect()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("🔥 {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;
    let app_state = AppState::new(config)?;

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["login", email, password] => {
            let outcome = LoginPage::new(&app_state).submit(email, password).await;
            match outcome.error {
                None => println!("Login efetuado. Página atual: {}", outcome.route),
                Some(message) => anyhow::bail!("{message}"),
            }
        }
        ["logout"] => {
            let route = LoginPage::new(&app_state).logout();
            println!("Sessão encerrada. Página atual: {route}");
        }
        ["whoami"] => match app_state.session.get_user() {
            Some(user) => println!(
                "{} <{}> [{}] ({})",
                user.full_name,
                user.email,
                user.role_label(),
                user.initials()
            ),
            None => println!("Nenhuma sessão ativa."),
        },
        ["dashboard"] => {
            ensure_route(&app_state, Route::Dashboard)?;
            let view = DashboardPage::new(&app_state).load().await?;
            let s = &view.summary;
            println!(
                "Entradas em {:02}/{}: {}",
                s.inputs_month.month, s.inputs_month.year, s.inputs_month.total_amount
            );
            println!(
                "Distribuições em {:02}/{}: {}",
                s.distributions_month.month, s.distributions_month.year, s.distributions_month.total_amount
            );
            println!("Estoque atual: {}", s.stock.current_stock);
        }
        ["beneficiaries"] => {
            ensure_route(&app_state, Route::Beneficiaries)?;
            let table = BeneficiariesPage::new(&app_state).load().await?;
            for row in &table.rows {
                println!(
                    "{:>5}  {:<30}  {:<40}  {:>8}",
                    row.id, row.name, row.address, row.monthly_limit
                );
            }
            println!("{} beneficiário(s)", table.total);
        }
        _ => anyhow::bail!(USAGE),
    }

    Ok(())
}

// Aplica as guardas como a navegação da interface faria
fn ensure_route(app_state: &AppState, to: Route) -> anyhow::Result<()> {
    let landed = app_state.navigator.navigate(to);
    if landed != to {
        anyhow::bail!("Acesso a {to} negado; redirecionado para {landed}. Faça login primeiro.");
    }
    Ok(())
}
