use std::{path::PathBuf, process::ExitCode};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_menu, validate_action, BackendOptions, DashboardSession, DeliveryBackend, ErrorKind,
    HttpBackend, OrderAction, OrderWorkflowController, StatusFilter, TransitionOutcome,
};
use serde::Serialize;
use shared::domain::{OrderId, RestaurantId, UserId};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod notice;
mod render;

use config::{load_settings, Settings};
use notice::{notice, Notice, NoticeContext};

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "Order queue and menu views for delivery restaurants")]
struct Args {
    /// Config file (defaults to ./dashboard.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// Resolve the operator's restaurant from its owner user id.
    #[arg(long, global = true)]
    owner_id: Option<i64>,
    #[arg(long, global = true)]
    restaurant_id: Option<i64>,
    #[arg(long, global = true)]
    token: Option<String>,
    /// Print views as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the restaurant's orders.
    Orders {
        /// ALL or one of CREADA, ACEPTADA, EN_PREPARACION, TERMINADA, RECHAZADA, CANCELADA.
        #[arg(long, default_value = "ALL")]
        status: StatusFilter,
        /// Keep polling and redraw on every refresh until interrupted.
        #[arg(long)]
        watch: bool,
    },
    /// Accept a newly created order.
    Accept { order_id: i64 },
    /// Reject a newly created order.
    Reject { order_id: i64 },
    /// Move an accepted order into preparation, or a preparing one to done.
    Advance { order_id: i64 },
    /// Cancel an accepted or preparing order.
    Cancel {
        order_id: i64,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Show a restaurant's menu grouped by category.
    Menu { restaurant_id: Option<i64> },
    /// List restaurants known to the backend.
    Restaurants,
}

impl Args {
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(v) = &self.server_url {
            settings.server_url = v.clone();
        }
        if self.owner_id.is_some() {
            settings.owner_id = self.owner_id;
        }
        if self.restaurant_id.is_some() {
            settings.restaurant_id = self.restaurant_id;
        }
        if self.token.is_some() {
            settings.auth_token = self.token.clone();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<Notice>() {
            Some(notice) => {
                eprintln!("{notice}");
                if notice.kind() == ErrorKind::Validation {
                    ExitCode::from(2)
                } else {
                    ExitCode::FAILURE
                }
            }
            None => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(args: Args) -> Result<()> {
    let mut settings = load_settings(args.config.as_deref())?;
    args.apply_overrides(&mut settings);
    settings.validate()?;

    let backend = HttpBackend::with_options(
        &settings.server_url,
        BackendOptions {
            auth_token: settings.auth_token.clone(),
            request_timeout: settings.request_timeout(),
        },
    )?;
    let json = args.json;

    match args.command {
        Command::Restaurants => {
            let restaurants = backend
                .list_restaurants()
                .await
                .map_err(notice(NoticeContext::LoadRestaurant))?;
            emit(json, &restaurants, || render::render_restaurants(&restaurants))
        }
        Command::Menu { restaurant_id } => {
            let restaurant_id = match restaurant_id {
                Some(id) => RestaurantId(id),
                None => open_session(&backend, &settings).await?.restaurant_id,
            };
            show_menu(&backend, restaurant_id, json).await
        }
        Command::Orders { status, watch } => {
            let session = open_session(&backend, &settings).await?;
            let mut controller = OrderWorkflowController::new(backend, session.restaurant_id);
            controller.set_filter(status);
            if watch {
                watch_orders(&mut controller, &session, &settings, json).await
            } else {
                controller
                    .refresh()
                    .await
                    .map_err(notice(NoticeContext::LoadOrders))?;
                print_orders(&controller, &session, json)
            }
        }
        Command::Accept { order_id } => {
            run_transition(backend, &settings, order_id, OrderAction::Accept, json).await
        }
        Command::Reject { order_id } => {
            run_transition(backend, &settings, order_id, OrderAction::Reject, json).await
        }
        Command::Advance { order_id } => {
            run_transition(backend, &settings, order_id, OrderAction::Advance, json).await
        }
        Command::Cancel { order_id, reason } => {
            let action = OrderAction::Cancel { reason };
            run_transition(backend, &settings, order_id, action, json).await
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

/// Resolves the restaurant this invocation works on. A configured
/// restaurant id wins; otherwise the owner id is looked up once.
async fn open_session(backend: &HttpBackend, settings: &Settings) -> Result<DashboardSession> {
    if let Some(id) = settings.restaurant_id {
        return Ok(DashboardSession::for_restaurant(RestaurantId(id)));
    }
    let Some(owner) = settings.owner_id else {
        bail!("no restaurant selected; set restaurant_id or owner_id in the config, environment or flags");
    };
    let session = DashboardSession::for_owner(backend, UserId(owner))
        .await
        .map_err(notice(NoticeContext::LoadRestaurant))?;
    info!(restaurant_id = session.restaurant_id.0, "restaurant resolved");
    Ok(session)
}

fn print_orders<B: DeliveryBackend>(
    controller: &OrderWorkflowController<B>,
    session: &DashboardSession,
    json: bool,
) -> Result<()> {
    let visible = controller.visible_orders();
    let cards: Vec<_> = visible.iter().map(render::order_card).collect();
    emit(json, &cards, || {
        let title = format!("Orders · {}", session.display_name());
        render::render_order_list(&title, &visible, controller.filter())
    })
}

async fn watch_orders<B: DeliveryBackend>(
    controller: &mut OrderWorkflowController<B>,
    session: &DashboardSession,
    settings: &Settings,
    json: bool,
) -> Result<()> {
    let mut ticker = tokio::time::interval(settings.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match controller.refresh().await {
                    Ok(_) => {
                        print_orders(controller, session, json)?;
                        if !json {
                            println!("-- refreshing every {}s, Ctrl-C to stop --", settings.poll_interval_secs);
                        }
                    }
                    Err(err) => eprintln!("{}", Notice::new(NoticeContext::LoadOrders, &err)),
                }
            }
            _ = &mut shutdown => {
                info!("watch stopped");
                return Ok(());
            }
        }
    }
}

async fn run_transition(
    backend: HttpBackend,
    settings: &Settings,
    order_id: i64,
    action: OrderAction,
    json: bool,
) -> Result<()> {
    let context = match action {
        OrderAction::Cancel { .. } => NoticeContext::CancelOrder,
        _ => NoticeContext::UpdateStatus,
    };
    validate_action(&action).map_err(notice(context))?;

    let session = open_session(&backend, settings).await?;
    let mut controller = OrderWorkflowController::new(backend, session.restaurant_id);
    controller
        .refresh()
        .await
        .map_err(notice(NoticeContext::LoadOrders))?;

    let event = action.event();
    let order_id = OrderId(order_id);
    let outcome = controller
        .request_transition(order_id, action)
        .await
        .map_err(notice(context))?;

    match &outcome {
        TransitionOutcome::Applied {
            refresh_error: Some(err),
            ..
        } => eprintln!("{}", Notice::new(NoticeContext::LoadOrders, err)),
        TransitionOutcome::NotOffered { status } => {
            warn!(order_id = order_id.0, %status, event = event.as_str(), "action not offered");
        }
        TransitionOutcome::Applied { .. } => {}
    }
    let report = render::transition_report(order_id, event, &outcome);
    emit(json, &report, || render::render_transition(&report))
}

async fn show_menu(backend: &HttpBackend, restaurant_id: RestaurantId, json: bool) -> Result<()> {
    let restaurant = match backend.list_restaurants().await {
        Ok(restaurants) => restaurants.into_iter().find(|r| r.id == restaurant_id),
        Err(err) => {
            warn!(error = %err, "restaurant details unavailable; showing menu without header");
            None
        }
    };
    let catalog = load_menu(backend, restaurant_id)
        .await
        .map_err(notice(NoticeContext::LoadMenu))?;
    let view = render::menu_view(restaurant, &catalog);
    emit(json, &view, || render::render_menu(&view))
}
