use crate::infra::{default_scorer, demo_vehicles, InMemoryVehicleRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use repair_advisor::error::AppError;
use repair_advisor::workflows::legitimacy::{
    render_script, synthesize, BatchReport, CheckServiceInput, DrivingConditions,
    QuoteAggregator, QuoteCheckRequest, QuoteLineRequest, ServiceCheckRequest, VehicleInfo,
    VehicleServiceChecker,
};
use repair_advisor::workflows::quote_import::QuoteImporter;
use std::path::PathBuf;
use std::sync::Arc;

const SAMPLE_QUOTE: &str = include_str!("../../../crates/repair-advisor/sample_quote.csv");

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Service as written on the recommendation, e.g. "Engine Flush"
    #[arg(long)]
    pub(crate) service: String,
    /// Current odometer reading
    #[arg(long)]
    pub(crate) mileage: u32,
    /// Odometer reading at the last time this service was done
    #[arg(long)]
    pub(crate) last_mileage: Option<u32>,
    /// Date of the last time this service was done (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) last_date: Option<NaiveDate>,
    /// Price the shop quoted
    #[arg(long)]
    pub(crate) price: Option<f64>,
    /// Symptom you have noticed; repeat for several
    #[arg(long = "symptom")]
    pub(crate) symptoms: Vec<String>,
    /// Vehicle age in months
    #[arg(long)]
    pub(crate) age_months: Option<u32>,
    /// Driving conditions: normal or severe
    #[arg(long, value_parser = crate::infra::parse_driving, default_value = "normal")]
    pub(crate) driving: DrivingConditions,
    /// Model year, used to personalize the script
    #[arg(long)]
    pub(crate) year: Option<u16>,
    #[arg(long)]
    pub(crate) make: Option<String>,
    #[arg(long)]
    pub(crate) model: Option<String>,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the assessment as JSON instead of a script
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// CSV export with Service, Price, and Symptoms columns
    pub(crate) csv: PathBuf,
    /// Current odometer reading
    #[arg(long)]
    pub(crate) mileage: u32,
    /// Driving conditions: normal or severe
    #[arg(long, value_parser = crate::infra::parse_driving, default_value = "normal")]
    pub(crate) driving: DrivingConditions,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the whole-quote portion of the demo
    #[arg(long)]
    pub(crate) skip_quote: bool,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let input = CheckServiceInput {
        service: args.service,
        current_mileage: args.mileage,
        last_service_mileage: args.last_mileage,
        last_service_date: args.last_date,
        symptoms: args.symptoms,
        quoted_price: args.price,
        vehicle_age_months: args.age_months,
        driving_conditions: args.driving,
    };
    input.validate(today)?;

    let check = default_scorer().check(&input, today);
    if args.json {
        print_json(&check);
        return Ok(());
    }

    let vehicle = VehicleInfo {
        year: args.year,
        make: args.make,
        model: args.model,
        mileage: Some(args.mileage),
    };
    let script = synthesize(&check, &input.service, input.quoted_price, Some(&vehicle));
    print!("{}", render_script(&script, &check, &input.service));
    Ok(())
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let lines = QuoteImporter::from_path(&args.csv)?;

    let mut inputs = Vec::with_capacity(lines.len());
    for line in lines {
        let input = CheckServiceInput {
            quoted_price: line.quoted_price,
            symptoms: line.symptoms,
            driving_conditions: args.driving,
            ..CheckServiceInput::new(line.service_description, args.mileage)
        };
        input.validate(today)?;
        inputs.push(input);
    }

    let report = QuoteAggregator::standard().aggregate(&default_scorer(), &inputs, today);
    if args.json {
        print_json(&report);
    } else {
        render_batch_report(&report);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let checker = VehicleServiceChecker::new(
        Arc::new(InMemoryVehicleRepository::seeded()),
        default_scorer(),
        DrivingConditions::Normal,
    );

    println!("Repair advisor demo ({today})");
    println!("Garage:");
    for vehicle in demo_vehicles() {
        println!(
            "- {} {} at {} miles ({} service records)",
            vehicle.id.0,
            vehicle.info().description().unwrap_or_default(),
            vehicle.current_mileage,
            vehicle.maintenance.len()
        );
    }

    let requests = [
        ("demo-civic", "Oil Change", Some(89.0), Vec::new()),
        (
            "demo-civic",
            "Front Brake Pads",
            Some(280.0),
            vec!["grinding".to_string()],
        ),
        ("demo-civic", "Cabin Air Filter", Some(120.0), Vec::new()),
        ("demo-tacoma", "Engine Flush", Some(149.0), Vec::new()),
    ];

    for (vehicle_id, service, quoted_price, symptoms) in requests {
        let report = checker.check(
            ServiceCheckRequest {
                vehicle_id: vehicle_id.to_string(),
                service_description: service.to_string(),
                quoted_price,
                symptoms,
            },
            today,
        )?;

        println!("\n{}", "=".repeat(72));
        print!(
            "{}",
            render_script(&report.script, &report.check, &report.service_description)
        );
        println!("\nWhat to do:");
        for recommendation in &report.recommendations {
            println!("- {recommendation}");
        }
    }

    if args.skip_quote {
        return Ok(());
    }

    let lines: Vec<QuoteLineRequest> = QuoteImporter::from_reader(SAMPLE_QUOTE.as_bytes())?;
    let report = checker.check_quote(
        QuoteCheckRequest {
            vehicle_id: "demo-civic".to_string(),
            items: lines,
        },
        today,
    )?;
    println!("\n{}", "=".repeat(72));
    println!("Sample shop quote for demo-civic");
    render_batch_report(&report);

    Ok(())
}

fn render_batch_report(report: &BatchReport) {
    println!("Quote review ({} items)", report.items.len());
    for item in &report.items {
        let price = item
            .quoted_price
            .map(|price| format!("${price:.2}"))
            .unwrap_or_else(|| "unpriced".to_string());
        println!(
            "- {} [{}] {} | confidence {}% | scam likelihood {}%",
            item.service,
            price,
            item.check.tier.label(),
            item.check.confidence,
            item.check.scam_likelihood
        );
        for flag in &item.check.red_flags {
            println!("    ! {flag}");
        }
    }

    println!(
        "Overall scam score: {:.1} | potential savings: ${:.2}",
        report.overall_scam_score, report.total_potential_savings
    );
    print_bucket("Do now", &report.do_now);
    print_bucket("Schedule soon", &report.schedule_soon);
    print_bucket("Decline or postpone", &report.decline);

    if !report.patterns.is_empty() {
        println!("Patterns:");
        for pattern in &report.patterns {
            println!("- {} ({})", pattern.summary, pattern.services.join(", "));
        }
    }
}

fn print_bucket(label: &str, services: &[String]) {
    if services.is_empty() {
        println!("{label}: none");
    } else {
        println!("{label}: {}", services.join(", "));
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("JSON output unavailable: {err}"),
    }
}
