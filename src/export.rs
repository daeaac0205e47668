// ==========================================
// 输液袋更换排程系统 - 打印导出
// ==========================================
// 职责: 排程结果 → CSV 行 / 纯文本月历
// 红线: 只做格式化，不做任何判定
// ==========================================

use crate::domain::bag::Bag;
use crate::domain::calendar::{CalendarCell, CalendarEvent, MonthGrid};
use crate::engine::alert::BagAlert;
use crate::i18n::{t, t_with_args};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;
use thiserror::Error;

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// CSV 行（一袋一行）
#[derive(Debug, Serialize)]
struct ScheduleCsvRow {
    bag_index: usize,
    start_date: String,
    end_date: String,
    duration_days: i32,
    volume: String,
    rate: String,
    alert: String,
    reprogram: bool,
    rn_visit: bool,
}

/// 写出排程 CSV
///
/// 提醒列使用稳定代码（如 `ASPIRATION_TOMORROW`），与语言无关
pub fn write_schedule_csv<W: Write>(
    writer: W,
    bags: &[Bag],
    alerts: &[BagAlert],
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    for bag in bags {
        let alert = alerts.iter().find(|a| a.bag_index == bag.index);
        wtr.serialize(ScheduleCsvRow {
            bag_index: bag.index,
            start_date: bag.start_date.to_string(),
            end_date: bag.end_date.to_string(),
            duration_days: bag.duration_days,
            volume: bag.volume_label(),
            rate: bag.rate_label(),
            alert: alert.map(|a| a.state.to_string()).unwrap_or_else(|| "NONE".to_string()),
            reprogram: alert.is_some_and(|a| a.duration_changed),
            rn_visit: alert.is_some_and(|a| a.rn_visit_required),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// 单元格标记: `*` 换袋, `R` 重设泵, `N` RN 上门, `X` 拔管
fn cell_marks(cell: &CalendarCell) -> String {
    let mut marks = String::new();
    for event in &cell.events {
        match event {
            CalendarEvent::Bag(e) => {
                marks.push('*');
                if e.reprogram {
                    marks.push('R');
                }
                if e.rn_visit {
                    marks.push('N');
                }
            }
            CalendarEvent::FinalDisconnect => marks.push('X'),
        }
    }
    marks
}

/// 渲染纯文本月历（周日..周六），每月之后列出当月事件明细
pub fn render_calendar_text(grids: &[MonthGrid]) -> String {
    // 表头按语言预排版，单元格内容只含 ASCII
    let header = t("calendar.weekday_header");

    let mut out = String::new();
    for grid in grids {
        let title = t_with_args(
            "calendar.month_title",
            &[
                ("year", &grid.year.to_string()),
                ("month", &format!("{:02}", grid.month)),
            ],
        );
        let _ = writeln!(out, "{}", title);
        let _ = writeln!(out, "{}", header.trim_end());

        for week in &grid.weeks {
            let line: String = week
                .iter()
                .map(|slot| match slot {
                    Some(cell) => {
                        format!("{:<7}", format!("{:>2}{}", cell.date.format("%d"), cell_marks(cell)))
                    }
                    None => " ".repeat(7),
                })
                .collect();
            let _ = writeln!(out, "{}", line.trim_end());
        }

        for cell in grid.cells().filter(|c| c.has_events()) {
            for event in &cell.events {
                let detail = match event {
                    CalendarEvent::Bag(e) => {
                        let mut parts = vec![
                            t_with_args("calendar.bag_days", &[("days", &e.duration_days.to_string())]),
                            e.volume_label.clone(),
                            e.rate_label.clone(),
                        ];
                        if e.reprogram {
                            parts.push(t("calendar.reprogram"));
                        }
                        if e.rn_visit {
                            parts.push(t("calendar.rn_visit"));
                        }
                        parts.join(" | ")
                    }
                    CalendarEvent::FinalDisconnect => t("calendar.final_disconnect"),
                };
                let _ = writeln!(out, "  {}  {}", cell.date.format("%m-%d"), detail);
            }
        }
        out.push('\n');
    }

    out
}
