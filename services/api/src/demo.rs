use crate::infra::{load_applicants, InMemoryApplicationStore};
use clap::Args;
use school_careers::config::{AppConfig, IntakeConfig};
use school_careers::error::AppError;
use school_careers::workflows::directory::{
    filter_applicants, recent_applications, ApplicantDirectory, CategoryFilter, DashboardStats,
    DirectoryQuery, DirectoryView,
};
use school_careers::workflows::intake::{
    validate_application, ApplicationForm, ApplicationId, ApplicationRecord, CvUpload,
    IntakeService, JobCategory,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Args, Debug, Default)]
pub(crate) struct ApplicantsListArgs {
    /// Category to show: all, it, maintenance, or accounting (defaults to all)
    #[arg(long, value_parser = crate::infra::parse_category)]
    pub(crate) category: Option<CategoryFilter>,
    /// Case-insensitive search over applicant name and email
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Applicant CSV export to read instead of the bundled sample
    #[arg(long)]
    pub(crate) applicants_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ApplicantsShowArgs {
    /// Application id to open
    pub(crate) id: String,
    /// Applicant CSV export to read instead of the bundled sample
    #[arg(long)]
    pub(crate) applicants_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ApplicantsStatsArgs {
    /// How many recent applications to list
    #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub(crate) recent: usize,
    /// Applicant CSV export to read instead of the bundled sample
    #[arg(long)]
    pub(crate) applicants_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the simulated submission delay in milliseconds
    #[arg(long)]
    pub(crate) delay_ms: Option<u64>,
    /// Applicant CSV export to seed the directory instead of the bundled sample
    #[arg(long)]
    pub(crate) applicants_csv: Option<PathBuf>,
}

pub(crate) fn run_applicants_list(args: ApplicantsListArgs) -> Result<(), AppError> {
    let ApplicantsListArgs {
        category,
        search,
        applicants_csv,
    } = args;

    let records = resolve_applicants(applicants_csv)?;
    let query = DirectoryQuery::new(category.unwrap_or_default(), search.unwrap_or_default());
    let visible = filter_applicants(&records, &query);
    render_applicant_table(&query, &visible);
    Ok(())
}

pub(crate) fn run_applicants_show(args: ApplicantsShowArgs) -> Result<(), AppError> {
    let records = resolve_applicants(args.applicants_csv)?;
    let mut view = DirectoryView::new();
    match view.open(&records, &ApplicationId(args.id.clone())) {
        Some(record) => {
            render_applicant_detail(record);
            Ok(())
        }
        None => Err(AppError::ApplicantNotFound(args.id)),
    }
}

pub(crate) fn run_applicants_stats(args: ApplicantsStatsArgs) -> Result<(), AppError> {
    let records = resolve_applicants(args.applicants_csv)?;
    render_stats(&records, args.recent);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        delay_ms,
        applicants_csv,
    } = args;

    let config = AppConfig::load()?;
    let intake_config = match delay_ms {
        Some(ms) => IntakeConfig {
            submission_delay: Duration::from_millis(ms),
        },
        None => config.intake,
    };
    let path = applicants_csv.or(config.directory.applicants_csv);
    let store = Arc::new(InMemoryApplicationStore::seeded(load_applicants(
        path.as_deref(),
    )?));
    let service = IntakeService::new(store.clone(), intake_config);

    println!("School careers portal demo");

    println!("\nEmpty application form");
    match validate_application(ApplicationForm::default()) {
        Ok(_) => println!("- unexpectedly accepted"),
        Err(rejection) => {
            println!("- rejected: {}", rejection);
            if let Some(errors) = rejection.field_errors() {
                for (field, error) in errors.iter() {
                    println!("  - {}: {}", field, error.message);
                }
            }
        }
    }

    let form = demo_application_form();
    println!(
        "\nSubmitting application for {} ({}), pending for {} ms",
        form.full_name,
        JobCategory::Maintenance,
        intake_config.submission_delay.as_millis()
    );
    let (first, second) = tokio::join!(
        service.submit(form.clone(), service.shutdown_token().child_token()),
        service.submit(form, service.shutdown_token().child_token()),
    );
    if let Err(err) = second {
        println!("- repeated click while pending: {}", err);
    }
    let record = match first {
        Ok(record) => record,
        Err(err) => {
            println!("- submission failed: {}", err);
            return Ok(());
        }
    };
    println!(
        "- accepted as {} on {}",
        record.id(),
        record.applied_on_label()
    );

    let records = store.list_applicants()?;
    let mut view = DirectoryView::new();
    view.set_category(CategoryFilter::Only(record.job_category()));
    println!();
    render_applicant_table(view.query(), &view.visible(&records));

    if let Some(detail) = view.open(&records, record.id()) {
        println!();
        render_applicant_detail(detail);
    }
    view.close();

    println!();
    render_stats(&records, DEFAULT_RECENT_LIMIT);
    Ok(())
}

fn resolve_applicants(flag: Option<PathBuf>) -> Result<Vec<ApplicationRecord>, AppError> {
    let path = match flag {
        Some(path) => Some(path),
        None => AppConfig::load()?.directory.applicants_csv,
    };
    Ok(load_applicants(path.as_deref())?)
}

fn demo_application_form() -> ApplicationForm {
    ApplicationForm {
        full_name: "Huda Nasser".to_string(),
        email: "huda.n@example.com".to_string(),
        phone: "+966 55 210 9876".to_string(),
        category: Some(JobCategory::Maintenance),
        cv: Some(CvUpload {
            file_name: "huda-nasser-cv.pdf".to_string(),
            content: b"%PDF-1.7 sample".to_vec(),
        }),
    }
}

fn render_applicant_table(query: &DirectoryQuery, visible: &[&ApplicationRecord]) {
    if query.search.is_empty() {
        println!("Applicants in {} ({} shown)", query.category, visible.len());
    } else {
        println!(
            "Applicants in {} matching '{}' ({} shown)",
            query.category,
            query.search,
            visible.len()
        );
    }

    if visible.is_empty() {
        println!("- none");
        return;
    }
    for record in visible {
        println!(
            "- {} | {} | {} | {} | applied {}",
            record.id(),
            record.full_name(),
            record.email(),
            record.job_category().label(),
            record.applied_on_label()
        );
    }
}

fn render_applicant_detail(record: &ApplicationRecord) {
    println!("Applicant {}", record.id());
    println!("  Name: {}", record.full_name());
    println!("  Email: {}", record.email());
    println!("  Phone: {}", record.phone());
    println!("  Position: {}", record.job_category().label());
    println!("  Applied: {}", record.applied_on_label());
    println!("  CV: {}", record.cv().0);
}

fn render_stats(records: &[ApplicationRecord], recent: usize) {
    let stats = DashboardStats::from_records(records);
    println!("Total applicants: {}", stats.total_applicants);
    for category in JobCategory::ALL {
        println!("- {}: {}", category.label(), stats.by_category.get(category));
    }

    let latest = recent_applications(records, recent);
    if latest.is_empty() {
        return;
    }
    println!("Recent applications");
    for record in latest {
        println!(
            "- {} ({}) {}",
            record.full_name(),
            record.job_category().label(),
            record.applied_on_label()
        );
    }
}
