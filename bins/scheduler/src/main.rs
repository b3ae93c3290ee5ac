//! Daily WhatsApp report scheduler for Praxis.
//!
//! Polls the configured schedule times and dispatches the daily
//! reports: consultants' activities of the day, overdue activities,
//! and the admin list of titles due today. At-most-once-per-day is
//! enforced through the persisted dispatch log; if the process is down
//! at the scheduled minute, that day's dispatch is skipped in
//! non-forced mode.
//!
//! Usage:
//!   scheduler                 - Run the polling loop
//!   scheduler --once          - Run one check and exit
//!   scheduler --once --force  - Send regardless of the configured times
//!   scheduler --interval 60   - Seconds between checks in loop mode

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use praxis_core::notify::{
    mask_phone, messages, should_send, DispatchCounts, Notifier, NotifierSettings, NotifyError,
    ReportKind,
};
use praxis_db::repositories::NotificationGateway;
use praxis_db::{
    connect, ActivityRepository, DispatchLogRepository, PayableRepository, ReceivableRepository,
};
use praxis_shared::AppConfig;

/// Boundary transport: deliveries are logged here; the real WhatsApp
/// client is an external collaborator wired in deployment.
struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, phone: &str, message: &str) -> Result<(), NotifyError> {
        info!(
            phone = %mask_phone(phone),
            lines = message.lines().count(),
            "whatsapp message dispatched"
        );
        Ok(())
    }
}

struct Options {
    once: bool,
    force: bool,
    interval_secs: u64,
}

fn parse_options(default_interval: u64) -> Options {
    let mut options = Options {
        once: false,
        force: false,
        interval_secs: default_interval,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--once" => options.once = true,
            "--force" => options.force = true,
            "--interval" => {
                if let Some(value) = args.next().and_then(|v| v.parse().ok()) {
                    options.interval_secs = value;
                }
            }
            other => warn!(argument = other, "ignoring unknown argument"),
        }
    }
    options.interval_secs = options.interval_secs.max(10);
    options
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "praxis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");
    let mut options = parse_options(config.scheduler.interval_secs);

    if options.force && !options.once {
        warn!("Force mode with loop can resend repeatedly; disabling force.");
        options.force = false;
    }

    let timezone = Tz::from_str(&config.notifier.timezone).unwrap_or(chrono_tz::UTC);
    let settings = NotifierSettings::from_config(&config.notifier);

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    let gateway = NotificationGateway::new(Arc::new(LogNotifier), settings.clone());
    let dispatcher = Dispatcher {
        activities: ActivityRepository::new(db.clone()),
        payables: PayableRepository::new(db.clone()),
        receivables: ReceivableRepository::new(db.clone()),
        dispatch_log: DispatchLogRepository::new(db),
        gateway,
        settings,
    };

    loop {
        let now = Utc::now().with_timezone(&timezone).naive_local();
        let counts = dispatcher.run_due(now, options.force).await?;
        if options.once || counts.any() {
            info!(
                today = counts.activities_today,
                overdue = counts.activities_overdue,
                due_titles = counts.admin_due_titles,
                "daily dispatch run finished"
            );
        }
        if options.once {
            break;
        }
        tokio::time::sleep(Duration::from_secs(options.interval_secs)).await;
    }

    Ok(())
}

struct Dispatcher {
    activities: ActivityRepository,
    payables: PayableRepository,
    receivables: ReceivableRepository,
    dispatch_log: DispatchLogRepository,
    gateway: NotificationGateway,
    settings: NotifierSettings,
}

impl Dispatcher {
    /// Runs every report whose schedule matches `now`.
    async fn run_due(
        &self,
        now: chrono::NaiveDateTime,
        force: bool,
    ) -> anyhow::Result<DispatchCounts> {
        let today = now.date();
        let mut counts = DispatchCounts::default();

        if self.due(ReportKind::ActivitiesToday, now, force).await? {
            counts.activities_today = self.send_activity_report(today, true).await?;
            self.dispatch_log
                .mark_sent(ReportKind::ActivitiesToday, today)
                .await?;
        }
        if self.due(ReportKind::ActivitiesOverdue, now, force).await? {
            counts.activities_overdue = self.send_activity_report(today, false).await?;
            self.dispatch_log
                .mark_sent(ReportKind::ActivitiesOverdue, today)
                .await?;
        }
        if self.due(ReportKind::AdminDueTitles, now, force).await? {
            counts.admin_due_titles = self.send_due_titles(today).await?;
            self.dispatch_log
                .mark_sent(ReportKind::AdminDueTitles, today)
                .await?;
        }
        Ok(counts)
    }

    async fn due(
        &self,
        kind: ReportKind,
        now: chrono::NaiveDateTime,
        force: bool,
    ) -> anyhow::Result<bool> {
        let already_sent = self.dispatch_log.already_sent(kind, now.date()).await?;
        Ok(should_send(
            self.settings.schedule_for(kind),
            now,
            already_sent,
            force,
        ))
    }

    async fn send_activity_report(
        &self,
        today: chrono::NaiveDate,
        planned_today: bool,
    ) -> anyhow::Result<usize> {
        let (rows, label) = if planned_today {
            (self.activities.planned_for(today).await?, "de hoje")
        } else {
            (self.activities.overdue_on(today).await?, "em atraso")
        };
        let mut sent = 0;
        for row in rows {
            let message = messages::activity_report(&row.digest, label);
            for phone in &row.consultant_phones {
                self.gateway.to_consultant(phone, &message);
                sent += 1;
            }
        }
        Ok(sent)
    }

    async fn send_due_titles(&self, today: chrono::NaiveDate) -> anyhow::Result<usize> {
        let mut sent = 0;
        for due in self.receivables.due_on(today).await? {
            self.gateway
                .to_admins(&messages::receivable_due_today(&due.digest()));
            sent += 1;
        }
        for due in self.payables.due_on(today).await? {
            self.gateway
                .to_admins(&messages::payable_due_today(&due.digest()));
            sent += 1;
        }
        Ok(sent)
    }
}
