use anyhow::Error;
use reqwest::Client;
use structopt::StructOpt;

use courier_admin::{
    endpoints::{self, DocumentStatus},
    AuthGate, Id, SessionStore,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::from_args();

    log::debug!("Starting application with {:#?}", args);

    let client = Client::builder()
        .user_agent(courier_admin::DEFAULT_USER_AGENT)
        .build()?;

    // the gate enforces the admin-only rule, so a non-admin account fails
    // here rather than on the first endpoint call
    let gate = AuthGate::new(SessionStore::new());
    let session = gate
        .login(&client, &args.host, &args.email, &args.password)
        .await?;

    let token = &session.token;

    match &args.cmd {
        Command::Analytics {
            start_date,
            end_date,
        } => {
            let summary = endpoints::get_analytics(
                &client, &args.host, token, start_date, end_date,
            )
            .await?;
            println!("{:#?}", summary);
        },
        Command::Revenue {
            start_date,
            end_date,
        } => {
            let revenue = endpoints::get_rider_revenue(
                &client, &args.host, token, start_date, end_date,
            )
            .await?;
            println!("{:#?}", revenue);
        },
        Command::Users { role, page, limit } => {
            let page = endpoints::get_users(
                &client, &args.host, token, role, *page, *limit,
            )
            .await?;
            println!("{:#?}", page);
        },
        Command::Orders { status } => {
            let page =
                endpoints::get_orders(&client, &args.host, token, status)
                    .await?;
            println!("{:#?}", page);
        },
        Command::Order { id } => {
            let details = endpoints::get_order_details(
                &client,
                &args.host,
                Some(token),
                id,
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&details)?);
        },
        Command::RiderDocuments { status } => {
            let riders = endpoints::get_rider_documents(
                &client, &args.host, token, *status,
            )
            .await?;
            println!("{:#?}", riders);
        },
        Command::ApproveDocument { id } => {
            let document = endpoints::update_document_status(
                &client,
                &args.host,
                token,
                id,
                DocumentStatus::Approved,
                None,
            )
            .await?;
            println!("{:#?}", document);
        },
        Command::RejectDocument { id, reason } => {
            let document = endpoints::update_document_status(
                &client,
                &args.host,
                token,
                id,
                DocumentStatus::Rejected,
                Some(reason),
            )
            .await?;
            println!("{:#?}", document);
        },
        Command::VehicleTypes { include_inactive } => {
            let include_inactive =
                if *include_inactive { Some(true) } else { None };
            let types = endpoints::get_vehicle_types(
                &client,
                &args.host,
                token,
                include_inactive,
            )
            .await?;
            println!("{:#?}", types);
        },
        Command::DocumentSettings { vehicle_type } => {
            let settings = match vehicle_type {
                Some(name) => {
                    endpoints::get_document_settings_for_vehicle_type(
                        &client, &args.host, token, name,
                    )
                    .await?
                },
                None => {
                    endpoints::get_document_settings(
                        &client, &args.host, token,
                    )
                    .await?
                },
            };
            println!("{:#?}", settings);
        },
        Command::Notify {
            title,
            body,
            users,
        } => {
            endpoints::send_bulk_push(
                &client, &args.host, token, title, body, users, None,
            )
            .await?;
            log::info!("Notification queued for {} users", users.len());
        },
    }

    log::info!("Logging out");
    gate.logout();

    Ok(())
}

#[derive(Debug, StructOpt)]
struct Args {
    #[structopt(
        long = "host",
        env = "COURIER_HOST",
        help = "The Courier API server's hostname"
    )]
    host: String,
    #[structopt(
        short = "u",
        long = "email",
        env = "COURIER_EMAIL",
        help = "The admin account's email address or mobile number"
    )]
    email: String,
    #[structopt(
        short = "p",
        long = "password",
        env = "COURIER_PASSWORD",
        hide_env_values = true,
        help = "The admin account's password"
    )]
    password: String,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Show the dashboard's headline numbers for a date range.
    Analytics {
        #[structopt(long = "start-date")]
        start_date: String,
        #[structopt(long = "end-date")]
        end_date: String,
    },
    /// Show what each rider earned over a date range.
    Revenue {
        #[structopt(long = "start-date")]
        start_date: String,
        #[structopt(long = "end-date")]
        end_date: String,
    },
    /// List registered users with a given role.
    Users {
        #[structopt(long = "role", default_value = "user")]
        role: String,
        #[structopt(long = "page")]
        page: Option<u32>,
        #[structopt(long = "limit")]
        limit: Option<u32>,
    },
    /// List orders in a status bucket.
    Orders {
        #[structopt(default_value = "pending")]
        status: String,
    },
    /// Show everything the server knows about one order.
    Order { id: Id },
    /// List riders whose paperwork sits in a review state.
    RiderDocuments {
        #[structopt(default_value = "PENDING")]
        status: DocumentStatus,
    },
    /// Approve one uploaded document.
    ApproveDocument { id: Id },
    /// Reject one uploaded document, with a reason the rider will see.
    RejectDocument {
        id: Id,
        #[structopt(long = "reason")]
        reason: String,
    },
    /// List the vehicle types riders can register with.
    VehicleTypes {
        #[structopt(long = "include-inactive")]
        include_inactive: bool,
    },
    /// List document requirements, for one vehicle type or all of them.
    DocumentSettings {
        #[structopt(long = "vehicle-type")]
        vehicle_type: Option<String>,
    },
    /// Send a push notification to a set of users.
    Notify {
        #[structopt(long = "title")]
        title: String,
        #[structopt(long = "body")]
        body: String,
        #[structopt(long = "user", help = "May be given more than once")]
        users: Vec<Id>,
    },
}
