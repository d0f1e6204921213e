use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, Command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventmate_client::{
    config::Config,
    layout::{LayoutEditor, Tool},
    models::ReviewRequest,
    seating::{row_label, PlanCell, SeatingPlan, Selection},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(config);

    let cli = Command::new("eventmate")
        .version("0.1.0")
        .about("EventMate ticketing client")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("login")
                .about("Log in and persist the session")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Drop the persisted session"))
        .subcommand(
            Command::new("register")
                .about("Create an account")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(
            Command::new("events")
                .about("List events, optionally by category")
                .arg(Arg::new("category").long("category")),
        )
        .subcommand(
            Command::new("event")
                .about("Show one event with its sections")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("seats")
                .about("Render the seat map for a show")
                .arg(Arg::new("event-id").required(true).value_parser(value_parser!(i64)))
                .arg(Arg::new("date").long("date").help("Show date (YYYY-MM-DD or full ISO)")),
        )
        .subcommand(
            Command::new("book")
                .about("Book seats and print the checkout URL")
                .arg(Arg::new("event-id").required(true).value_parser(value_parser!(i64)))
                .arg(Arg::new("date").long("date"))
                .arg(
                    Arg::new("seat")
                        .long("seat")
                        .action(ArgAction::Append)
                        .required(true)
                        .help("Seat identifier, e.g. Standard-1-4 (repeatable)"),
                ),
        )
        .subcommand(Command::new("bookings").about("List your bookings"))
        .subcommand(
            Command::new("pay-now")
                .about("Restart checkout for a pending booking")
                .arg(Arg::new("booking-id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("layouts")
                .about("Manage seating layouts")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List saved layouts"))
                .subcommand(
                    Command::new("create")
                        .about("Save a layout painted from a text stencil")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("stencil")
                                .long("stencil")
                                .required(true)
                                .help("File of rows: digits pick a tier, '.' is a gap"),
                        )
                        .arg(
                            Arg::new("tier")
                                .long("tier")
                                .action(ArgAction::Append)
                                .help("Tier as NAME:PRICE[:COLOR] (repeatable)"),
                        ),
                )
                .subcommand(
                    Command::new("delete")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("reviews")
                .about("List reviews for an event")
                .arg(Arg::new("event-id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("review")
                .about("Add a review")
                .arg(Arg::new("event-id").required(true).value_parser(value_parser!(i64)))
                .arg(Arg::new("rating").long("rating").required(true).value_parser(value_parser!(i32)))
                .arg(Arg::new("comment").long("comment").default_value("")),
        )
        .subcommand(
            Command::new("chat")
                .about("Ask the AI assistant about events")
                .arg(Arg::new("query").required(true)),
        )
        .subcommand(Command::new("recommend").about("Events recommended for you"));

    match cli.get_matches().subcommand() {
        Some(("login", args)) => {
            let email = args.get_one::<String>("email").unwrap();
            let password = args.get_one::<String>("password").unwrap();
            let auth = state.api.login(email, password).await?;
            println!("Logged in as {} ({})", auth.name.as_deref().unwrap_or(email), auth.role.as_deref().unwrap_or("CUSTOMER"));
        }
        Some(("logout", _)) => {
            state.api.logout()?;
            println!("Logged out");
        }
        Some(("register", args)) => {
            let request = eventmate_client::models::RegisterRequest {
                name: args.get_one::<String>("name").unwrap().clone(),
                email: args.get_one::<String>("email").unwrap().clone(),
                password: args.get_one::<String>("password").unwrap().clone(),
                role: None,
            };
            state.api.register(&request).await?;
            println!("Registered {}; you can now log in", request.email);
        }
        Some(("events", args)) => {
            let events = match args.get_one::<String>("category") {
                Some(category) => state.api.search_events(category).await?,
                None => state.api.events().await?,
            };
            for event in &events {
                println!(
                    "{:>5}  {}  [{}]  {}",
                    event.id,
                    event.title,
                    event.category.as_deref().unwrap_or("-"),
                    event.date.as_deref().unwrap_or("-"),
                );
            }
        }
        Some(("event", args)) => {
            let event = state.api.event(*args.get_one::<i64>("id").unwrap()).await?;
            println!("{} — {}", event.title, event.venue.as_deref().unwrap_or("venue TBA"));
            if let Some(description) = &event.description {
                println!("{description}");
            }
            for section in &event.sections {
                println!("  section {:>3}  {:<12}  {:>8.2}", section.id, section.name, section.price);
            }
        }
        Some(("seats", args)) => {
            let event_id = *args.get_one::<i64>("event-id").unwrap();
            let date = args.get_one::<String>("date").cloned();
            let mut flow = state.booking_flow(event_id, date);
            flow.load().await?;
            report_notices(flow.take_notices());
            if flow.plan().is_empty() {
                println!("No seating layout available.");
            } else {
                print!("{}", render_plan(flow.plan(), flow.booked(), flow.selection()));
            }
        }
        Some(("book", args)) => {
            let event_id = *args.get_one::<i64>("event-id").unwrap();
            let date = args.get_one::<String>("date").cloned();
            let mut flow = state.booking_flow(event_id, date);
            flow.load().await?;

            for seat_id in args.get_many::<String>("seat").unwrap() {
                flow.toggle_seat(seat_id).with_context(|| format!("selecting {seat_id}"))?;
            }
            report_notices(flow.take_notices());
            if flow.selection().len() != args.get_many::<String>("seat").unwrap().len() {
                bail!("some requested seats could not be selected");
            }

            println!("Total: {:.2}", flow.total_price());
            let redirect = flow.submit().await;
            report_notices(flow.take_notices());
            let redirect = redirect?;
            println!("Booking #{} created. Pay here:\n{}", redirect.booking_id, redirect.url);
        }
        Some(("bookings", _)) => {
            for booking in state.api.my_bookings().await? {
                println!(
                    "{:>5}  {}  {}  {:>8.2}  [{}]",
                    booking.booking_id,
                    booking.event_title.as_deref().unwrap_or("-"),
                    booking.show_date.as_deref().unwrap_or("-"),
                    booking.total_amount.unwrap_or(0.0),
                    booking.payment_status.as_deref().unwrap_or("-"),
                );
            }
        }
        Some(("pay-now", args)) => {
            let booking_id = *args.get_one::<i64>("booking-id").unwrap();
            let session = state.api.pay_now(booking_id, &state.config.payment).await?;
            println!("Pay here:\n{}", session.url);
        }
        Some(("layouts", args)) => match args.subcommand() {
            Some(("list", _)) => {
                for layout in state.api.layouts().await? {
                    println!(
                        "{:>5}  {}  ({}x{})",
                        layout.id, layout.name, layout.total_rows, layout.total_cols
                    );
                }
            }
            Some(("create", args)) => {
                let name = args.get_one::<String>("name").unwrap();
                let stencil_path = args.get_one::<String>("stencil").unwrap();
                let tiers: Vec<String> =
                    args.get_many::<String>("tier").unwrap_or_default().cloned().collect();
                let stencil = std::fs::read_to_string(stencil_path)
                    .with_context(|| format!("reading stencil {stencil_path}"))?;
                let editor = editor_from_stencil(&stencil, &tiers)?;
                let saved = state.api.create_layout(&editor.save_payload(name)?).await?;
                println!(
                    "Saved layout #{} \"{}\" with {} seats",
                    saved.id,
                    saved.name,
                    editor.seat_count()
                );
            }
            Some(("delete", args)) => {
                state.api.delete_layout(*args.get_one::<i64>("id").unwrap()).await?;
                println!("Layout deleted");
            }
            _ => unreachable!(),
        },
        Some(("reviews", args)) => {
            let event_id = *args.get_one::<i64>("event-id").unwrap();
            for review in state.api.event_reviews(event_id).await? {
                println!(
                    "{}  {}/5  {}",
                    review.user_name.as_deref().unwrap_or("anonymous"),
                    review.rating,
                    review.comment.as_deref().unwrap_or(""),
                );
            }
        }
        Some(("review", args)) => {
            let request = ReviewRequest {
                event_id: *args.get_one::<i64>("event-id").unwrap(),
                rating: *args.get_one::<i32>("rating").unwrap(),
                comment: args.get_one::<String>("comment").unwrap().clone(),
            };
            state.api.add_review(&request).await?;
            println!("Review added");
        }
        Some(("chat", args)) => {
            let reply = state.api.chat(args.get_one::<String>("query").unwrap()).await?;
            println!("{reply}");
        }
        Some(("recommend", _)) => {
            for event in state.api.recommendations().await? {
                println!("{:>5}  {}", event.id, event.title);
            }
        }
        _ => unreachable!(),
    }

    Ok(())
}

fn report_notices(notices: Vec<eventmate_client::booking::Notice>) {
    for notice in notices {
        eprintln!("! {}", notice.message);
    }
}

/// Text rendering of a seating plan: `.` gap, `x` booked, `+` selected,
/// `o` available.
fn render_plan(
    plan: &SeatingPlan,
    booked: &std::collections::HashSet<String>,
    selection: &Selection,
) -> String {
    let symbol = |id: &str| {
        if booked.contains(id) {
            'x'
        } else if selection.contains(id) {
            '+'
        } else {
            'o'
        }
    };

    let mut out = String::new();
    match plan {
        SeatingPlan::Legacy(blocks) => {
            for block in blocks {
                out.push_str(&format!("== {} ({:.2})\n", block.name, block.price));
                for (r, row) in block.rows.iter().enumerate() {
                    out.push(row_label(r));
                    for seat in row {
                        out.push(' ');
                        out.push(symbol(&seat.id));
                    }
                    out.push('\n');
                }
            }
        }
        SeatingPlan::Advanced { rows, tiers } => {
            for (r, row) in rows.iter().enumerate() {
                out.push(row_label(r));
                for cell in row {
                    out.push(' ');
                    match cell {
                        PlanCell::Gap => out.push('.'),
                        PlanCell::Seat(seat) => out.push(symbol(&seat.id)),
                    }
                }
                out.push('\n');
            }
            for tier in tiers {
                out.push_str(&format!("  {} — {:.2}\n", tier.name, tier.price));
            }
        }
    }
    out.push_str("legend: o available, + selected, x sold, . aisle\n");
    out
}

/// Build an editor from a text stencil: each line is a row, digits 1-9 paint
/// the corresponding tier, `.` (or anything else) erases the cell to a gap.
/// Short lines pad with gaps so the grid stays rectangular.
fn editor_from_stencil(stencil: &str, tier_specs: &[String]) -> anyhow::Result<LayoutEditor> {
    let lines: Vec<&str> = stencil.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.is_empty() {
        bail!("stencil is empty");
    }
    let rows = lines.len();
    let cols = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

    let mut editor = LayoutEditor::new(rows, cols);

    // Replace the default palette when tiers were given on the command line.
    if !tier_specs.is_empty() {
        while editor.tiers().len() < tier_specs.len() {
            editor.add_tier();
        }
        while editor.tiers().len() > tier_specs.len() {
            let id = editor.tiers().last().unwrap().id.clone();
            editor.remove_tier(&id)?;
        }
        let ids: Vec<String> = editor.tiers().iter().map(|t| t.id.clone()).collect();
        for (id, spec) in ids.iter().zip(tier_specs) {
            let mut parts = spec.splitn(3, ':');
            let name = parts.next().unwrap_or_default();
            let price: f64 = parts
                .next()
                .with_context(|| format!("tier \"{spec}\" is missing a price"))?
                .parse()
                .with_context(|| format!("tier \"{spec}\" has an invalid price"))?;
            editor.rename_tier(id, name)?;
            editor.set_tier_price(id, price)?;
            if let Some(color) = parts.next() {
                editor.set_tier_color(id, color)?;
            }
        }
    }

    let tier_ids: Vec<String> = editor.tiers().iter().map(|t| t.id.clone()).collect();
    for (r, line) in lines.iter().enumerate() {
        let mut chars = line.chars();
        for c in 0..cols {
            match chars.next() {
                Some(ch) if ch.is_ascii_digit() && ch != '0' => {
                    let index = (ch as u8 - b'1') as usize;
                    let id = tier_ids
                        .get(index)
                        .with_context(|| format!("stencil references undefined tier {ch}"))?;
                    editor.select_tier(id)?;
                    editor.apply(r, c);
                }
                _ => {
                    editor.set_tool(Tool::Erase);
                    editor.apply(r, c);
                    editor.set_tool(Tool::Paint);
                }
            }
        }
    }
    Ok(editor)
}
