// tests/resources.rs

mod common;

use std::str::FromStr;

use antonieta_client::{
    api::ListFilters,
    common::error::AppError,
    models::{
        auth::{UserCreate, UserRole, UserUpdate},
        distribution::{DistributionCreate, DistributionUpdate},
        ration_input::{RationInputCreate, RationInputUpdate},
        ration_stock::{RationStockCreate, RationStockUpdate},
        ration_type::{RationTypeCreate, RationTypeUpdate},
    },
};
use chrono::NaiveDate;
use common::{spawn_logged_in, ListShape};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn distributions_hide_old_records_unless_asked() {
    let app = spawn_logged_in().await;
    let service = &app.state.distribution_service;

    let current = service.get_all(&ListFilters::default()).await.unwrap();
    assert_eq!(current.len(), 1);
    assert!(!current.items[0].old);
    assert_eq!(current.items[0].ration_stock_id, 4);
    assert_eq!(current.items[0].observations.as_deref(), Some("Entrega mensal"));

    let filters = ListFilters { include_old: Some(true), ..Default::default() };
    let all = service.get_all(&filters).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all.total, 2);
}

#[tokio::test]
async fn distribution_create_writes_ration_id() {
    let app = spawn_logged_in().await;
    let service = &app.state.distribution_service;

    let created = service
        .create(DistributionCreate {
            beneficiary_id: 6,
            ration_stock_id: 4,
            amount: dec("2.5"),
            date: day(2024, 6, 15),
            observations: None,
        })
        .await
        .unwrap();

    let stored = app.backend.find("distribution", created.id.unwrap()).unwrap();
    assert_eq!(stored["ration_id"], 4);
    assert!(stored.get("ration_stock_id").is_none());
    assert_eq!(created.ration_stock_id, 4);
    assert_eq!(created.amount, dec("2.5"));
    assert_eq!(created.date, Some(day(2024, 6, 15)));

    let of_beneficiary = service.get_by_beneficiary_id(6).await.unwrap();
    assert_eq!(of_beneficiary.len(), 1);
}

#[tokio::test]
async fn distribution_validation_happens_before_the_request() {
    let app = spawn_logged_in().await;
    let before = app.backend.requests().len();

    let err = app
        .state
        .distribution_service
        .create(DistributionCreate {
            beneficiary_id: 0,
            ration_stock_id: 4,
            amount: Decimal::ZERO,
            date: day(2024, 6, 15),
            observations: None,
        })
        .await
        .unwrap_err();

    assert!(err.is_client_side());
    assert_eq!(app.backend.requests().len(), before);
}

#[tokio::test]
async fn distribution_update_and_delete() {
    let app = spawn_logged_in().await;
    let service = &app.state.distribution_service;

    let updated = service
        .update(7, DistributionUpdate { amount: Some(dec("4")), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(updated.amount, dec("4"));
    assert_eq!(updated.beneficiary_id, 5);
    assert!(app.backend.requests().contains(&"PUT /distribution/".to_string()));

    service.delete(7).await.unwrap();
    assert!(matches!(service.get_by_id(7).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn ration_stock_crud_round_trip() {
    let app = spawn_logged_in().await;
    let service = &app.state.ration_stock_service;

    let created = service
        .create(RationStockCreate {
            name: "Ração Filhote".into(),
            description: "Pacote 1kg".into(),
            unit: "kg".into(),
            stock: dec("12.5"),
            ration_type_id: Some(3),
        })
        .await
        .unwrap();
    assert_eq!(created.stock_label(), "12.5 kg");

    // o backend exige o mesmo id na rota e no corpo
    let updated = service
        .update(created.id, RationStockUpdate { stock: Some(dec("20")), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(updated.stock, dec("20"));
    assert_eq!(updated.name, "Ração Filhote");

    let page = service.get_all(&ListFilters::default()).await.unwrap();
    assert_eq!(page.len(), 2);

    service.delete(created.id).await.unwrap();
    assert!(service.get_by_id(created.id).await.is_err());
}

#[tokio::test]
async fn ration_stock_create_is_validated_locally() {
    let app = spawn_logged_in().await;

    let err = app
        .state
        .ration_stock_service
        .create(RationStockCreate {
            name: String::new(),
            description: String::new(),
            unit: "kg".into(),
            stock: Decimal::ZERO,
            ration_type_id: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "O nome da ração é obrigatório.");
}

#[tokio::test]
async fn ration_inputs_by_stock_and_update() {
    let app = spawn_logged_in().await;
    let service = &app.state.ration_input_service;

    let created = service
        .create(RationInputCreate {
            ration_stock_id: 4,
            amount: dec("15.5"),
            date: day(2024, 6, 20),
            description: "Campanha".into(),
        })
        .await
        .unwrap();

    let of_stock = service.get_by_ration_stock_id(4).await.unwrap();
    assert_eq!(of_stock.len(), 2);
    assert_eq!(of_stock.total, 2);

    let id = created.id.unwrap();
    let updated = service
        .update(id, RationInputUpdate { description: Some("Campanha junina".into()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(updated.description, "Campanha junina");
    assert_eq!(updated.amount, dec("15.5"));

    let fetched = service.get_by_id(id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn ration_types_crud() {
    let app = spawn_logged_in().await;
    let service = &app.state.ration_type_service;
    app.backend.set_list_shape(ListShape::Pair);

    let created = service
        .create(RationTypeCreate { name: "Úmida".into(), description: None })
        .await
        .unwrap();
    let renamed = service
        .update(created.id, RationTypeUpdate { name: Some("Sachê".into()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(renamed.name, "Sachê");

    let page = service.get_all(&ListFilters::default()).await.unwrap();
    assert_eq!(page.total, page.len());
    assert_eq!(page.len(), 2);

    service.delete(created.id).await.unwrap();
    assert_eq!(service.get_all(&ListFilters::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn users_crud_and_session_refresh() {
    let app = spawn_logged_in().await;
    let service = &app.state.user_service;

    let created = service
        .create(UserCreate {
            email: "gestor@test.com".into(),
            password: "gestor123".into(),
            full_name: "Gustavo Gestor".into(),
            role: Some(UserRole::Gestor),
        })
        .await
        .unwrap();
    assert_eq!(created.role, UserRole::Gestor);
    assert_eq!(created.initials(), "GG");

    // editar o próprio usuário atualiza a sessão
    let me = app.state.session.get_user().unwrap();
    service
        .update(me.id, UserUpdate { full_name: Some("Admin Renomeado".into()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(app.state.session.get_user().unwrap().full_name, "Admin Renomeado");

    // 204 sem corpo
    service.delete(created.id).await.unwrap();
    assert!(matches!(service.get_by_id(created.id).await, Err(AppError::NotFound(_))));
    assert_eq!(app.backend.count("users"), 2);
}

#[tokio::test]
async fn user_create_rejects_short_password() {
    let app = spawn_logged_in().await;
    let before = app.backend.requests().len();

    let err = app
        .state
        .user_service
        .create(UserCreate {
            email: "x@test.com".into(),
            password: "123".into(),
            full_name: "X".into(),
            role: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "A senha deve ter no mínimo 6 caracteres.");
    assert_eq!(app.backend.requests().len(), before);
}

#[tokio::test]
async fn dashboard_summary_tolerates_string_numbers() {
    let app = spawn_logged_in().await;

    let summary = app.state.dashboard_service.get_summary().await.unwrap();

    assert_eq!(summary.inputs_month.total_amount, dec("150.5"));
    assert_eq!(summary.distributions_month.total_amount, dec("42.75"));
    assert_eq!(summary.distributions_month.month, 6);
    assert_eq!(summary.stock.current_stock, dec("100.5"));
    assert_eq!(summary.stock.last_updated.as_deref(), Some("2024-06-30T12:00:00"));
}
