use anyhow::Context;
use careboard_client::{FhirServerGateway, ServerConfig};
use careboard_core::{
    build_goal, EditContext, GoalEditor, Navigator, PatientContext, SubmitOutcome, UserContext,
};
use careboard_types::NonEmptyText;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use fhir::Goal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "careboard")]
#[command(about = "Careboard health goal entry CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Fields of the goal entry form plus the context the enclosing app would
/// normally inject.
#[derive(Args)]
struct GoalFields {
    /// Goal description text
    #[arg(long)]
    description: Option<String>,
    /// Start date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    start_date: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due_date: Option<String>,
    /// Patient id on the record server
    #[arg(long)]
    patient_id: Option<String>,
    /// Patient full name
    #[arg(long)]
    patient_name: Option<String>,
    /// Authenticated user id
    #[arg(long)]
    user_id: Option<String>,
    /// Authenticated user resource kind
    #[arg(long, default_value = "Patient")]
    user_kind: String,
    /// Caregiver display name, shown as who expressed the goal
    #[arg(long)]
    caregiver_name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter a health goal and submit it to the record server
    AddGoal {
        #[command(flatten)]
        fields: GoalFields,
        /// Record server base URL (falls back to CAREBOARD_SERVER_URL)
        #[arg(long)]
        server: Option<String>,
        /// Bearer token for the record server (falls back to CAREBOARD_TOKEN)
        #[arg(long)]
        token: Option<String>,
        /// Print the built record instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },
    /// Build a goal record from the given fields and print it
    ShowGoal {
        #[command(flatten)]
        fields: GoalFields,
    },
}

/// CLI stand-in for the application's router: going "back" just ends the
/// entry session.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn go_back(&mut self) {
        tracing::debug!("returning to previous view");
    }
}

fn parse_day(value: &str) -> anyhow::Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("could not derive a timestamp for '{value}'"))?;
    Ok(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

fn edit_context(fields: &GoalFields) -> anyhow::Result<EditContext> {
    let patient = match &fields.patient_id {
        Some(id) => Some(PatientContext {
            id: id.clone(),
            full_name: fields
                .patient_name
                .as_deref()
                .map(NonEmptyText::new)
                .transpose()
                .context("patient name cannot be empty")?,
        }),
        None => None,
    };

    let user = fields.user_id.as_ref().map(|id| UserContext {
        id: id.clone(),
        resource_kind: fields.user_kind.clone(),
    });

    let caregiver_name = fields
        .caregiver_name
        .as_deref()
        .map(NonEmptyText::new)
        .transpose()
        .context("caregiver name cannot be empty")?;

    Ok(EditContext {
        patient,
        user,
        caregiver_name,
    })
}

/// Apply the command-line fields to an editor the way the form's change
/// handlers would: only cells the user actually touched are replaced.
fn fill_form(editor: &mut GoalEditor, fields: &GoalFields) -> anyhow::Result<()> {
    if let Some(description) = &fields.description {
        editor.form_mut().set_description(description.clone());
    }
    if let Some(start) = &fields.start_date {
        editor.form_mut().set_start_date(Some(parse_day(start)?));
    }
    if let Some(due) = &fields.due_date {
        editor.form_mut().set_due_date(Some(parse_day(due)?));
    }
    Ok(())
}

fn render_goal(fields: &GoalFields) -> anyhow::Result<String> {
    let mut editor = GoalEditor::new(edit_context(fields)?, Utc::now());
    fill_form(&mut editor, fields)?;
    let goal = build_goal(editor.form(), editor.context())
        .context("could not build goal record")?;
    Ok(Goal::render(&goal)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("careboard_core=info".parse()?)
                .add_directive("careboard_client=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::AddGoal {
            fields,
            server,
            token,
            dry_run,
        }) => {
            if dry_run {
                match render_goal(&fields) {
                    Ok(json) => println!("{json}"),
                    Err(e) => eprintln!("Error building goal: {e:#}"),
                }
                return Ok(());
            }

            let base_url = server
                .or_else(|| std::env::var("CAREBOARD_SERVER_URL").ok())
                .context("no record server configured; pass --server or set CAREBOARD_SERVER_URL")?;
            let token = token.or_else(|| std::env::var("CAREBOARD_TOKEN").ok());
            let config = ServerConfig::new(base_url, token)?;
            let gateway = FhirServerGateway::new(config);

            let mut editor = GoalEditor::new(edit_context(&fields)?, Utc::now());
            fill_form(&mut editor, &fields)?;

            let mut navigator = TerminalNavigator;
            match editor.submit(&gateway, &mut navigator).await {
                Ok(SubmitOutcome::Created) => println!("Goal created."),
                Ok(SubmitOutcome::NotSubmitted) => {
                    println!("No patient in context; goal was not submitted.")
                }
                Err(e) => eprintln!("Error creating goal: {e}"),
            }
        }
        Some(Commands::ShowGoal { fields }) => match render_goal(&fields) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error building goal: {e:#}"),
        },
        None => {
            println!("Use 'careboard --help' for commands");
        }
    }

    Ok(())
}
