// ==========================================
// 输液袋更换排程系统 - 命令行入口
// ==========================================
// 用法:
//   infusion-bag-scheduler <patient.json> [--today YYYY-MM-DD] [--calendar] [--csv]
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use infusion_bag_scheduler::config::ConfigManager;
use infusion_bag_scheduler::db::get_default_db_path;
use infusion_bag_scheduler::domain::{parse_date, PatientScheduleInput};
use infusion_bag_scheduler::engine::ScheduleOrchestrator;
use infusion_bag_scheduler::{export, logging};

struct CliArgs {
    input_path: String,
    today: Option<NaiveDate>,
    calendar: bool,
    csv: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut input_path = None;
    let mut today = None;
    let mut calendar = false;
    let mut csv = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--today" => {
                let raw = args.next().context("--today 需要日期参数")?;
                today = Some(parse_date("today", &raw)?);
            }
            "--calendar" => calendar = true,
            "--csv" => csv = true,
            other if other.starts_with("--") => bail!("未知参数: {}", other),
            other => input_path = Some(other.to_string()),
        }
    }

    Ok(CliArgs {
        input_path: input_path.context("缺少患者快照文件路径")?,
        today,
        calendar,
        csv,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", infusion_bag_scheduler::APP_NAME, infusion_bag_scheduler::VERSION);
    tracing::info!("==================================================");

    let args = parse_args()?;

    let raw = std::fs::read_to_string(&args.input_path)
        .with_context(|| format!("无法读取患者快照: {}", args.input_path))?;
    let input: PatientScheduleInput =
        serde_json::from_str(&raw).context("患者快照 JSON 格式错误")?;

    let db_path = get_default_db_path();
    tracing::info!("使用配置数据库: {}", db_path);
    let config = ConfigManager::new(&db_path).context("无法打开配置数据库")?;
    let orchestrator = ScheduleOrchestrator::from_config(&config).await?;

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let result = orchestrator.compute(&input, today);

    if args.csv {
        export::write_schedule_csv(std::io::stdout(), &result.bags, &result.alerts.per_bag)?;
    } else if args.calendar {
        print!("{}", export::render_calendar_text(&result.calendar));
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
