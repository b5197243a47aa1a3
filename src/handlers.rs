// src/handlers.rs
// Páginas sem interface: o que cada tela faz, sem renderização.

pub mod beneficiaries;
pub mod dashboard;
pub mod login;
pub mod navigation;

pub use beneficiaries::BeneficiariesPage;
pub use dashboard::DashboardPage;
pub use login::{LoginOutcome, LoginPage};
pub use navigation::Navigator;
