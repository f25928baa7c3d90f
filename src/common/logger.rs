use csv::Writer;
use log::{info, warn};
use plotters::prelude::*;
use std::collections::BTreeSet;
use std::error::Error;
use std::ffi::OsStr;
use std::path::Path;
use std::{collections::HashMap, path::PathBuf};

use super::error::LoggerError;
use super::eval::{EpisodeRecord, EvalResult};

// Logger class for logging rollout and evaluation data
pub trait Logger {
    // log a piece of data
    fn log(&mut self, data: LogItem);

    // dump all logged data
    fn dump(&self) -> Result<(), LoggerError>;

    // check whether logging is possible. if try_to_fix, then
    // the Logger will try to resolve the issue, e.g. by
    // creating the dir
    fn check_can_log(&self, try_to_fix: bool) -> Result<(), LoggerError>;

    fn print_last(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogData {
    String(String),
    Float(f32),
    Int(i32),
}

impl LogData {
    fn as_f32(&self) -> Option<f32> {
        match self {
            LogData::String(_) => None,
            LogData::Float(f) => Some(*f),
            LogData::Int(i) => Some(*i as f32),
        }
    }
}

impl std::fmt::Display for LogData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogData::String(s) => write!(f, "{s}"),
            LogData::Float(v) => write!(f, "{v}"),
            LogData::Int(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogItem {
    items: HashMap<String, LogData>,
}

impl LogItem {
    pub fn push(mut self, k: String, v: LogData) -> Self {
        self.items.insert(k, v);

        self
    }

    pub fn get(&self, k: &str) -> Option<&LogData> {
        self.items.get(k)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn print(&self) {
        for (k, v) in &self.items {
            println!("{}: {}", k, v);
        }
    }

    pub fn combine(&mut self, other: LogItem) {
        other.items.into_iter().for_each(|(k, v)| {
            self.items.insert(k, v);
        });
    }
}

impl From<&EvalResult> for LogItem {
    fn from(value: &EvalResult) -> Self {
        LogItem::default()
            .push(
                "eval_n_episodes".to_string(),
                LogData::Int(value.episodes.len() as i32),
            )
            .push(
                "eval_ep_mean_len".to_string(),
                LogData::Float(value.mean_len),
            )
            .push(
                "eval_ep_mean_rew".to_string(),
                LogData::Float(value.mean_reward),
            )
    }
}

impl From<&EpisodeRecord> for LogItem {
    fn from(value: &EpisodeRecord) -> Self {
        LogItem::default()
            .push("episode".to_string(), LogData::Int(value.episode as i32))
            .push("ep_len".to_string(), LogData::Int(value.length as i32))
            .push("ep_rew".to_string(), LogData::Float(value.reward))
            .push(
                "ep_terminated".to_string(),
                LogData::Int(value.terminated as i32),
            )
    }
}

/// Buffers `LogItem`s in memory and writes them to a csv on `dump`,
/// alongside one png line plot per numeric key.
pub struct CsvLogger {
    overwrite: bool,
    dump_path: PathBuf,
    to_stdout: bool,
    keys: Vec<String>,
    data: Vec<LogItem>,
}

impl CsvLogger {
    pub fn new(dump_path: PathBuf, to_stdout: bool, overwrite: bool) -> Self {
        Self {
            dump_path,
            to_stdout,
            data: Vec::new(),
            keys: Vec::new(),
            overwrite,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn dump_dir(&self) -> PathBuf {
        match self.dump_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Writes the buffered records to `path`. Columns are the union of
    /// all logged keys, sorted; missing values are left empty.
    pub fn write_csv(&self, path: &Path) -> Result<(), LoggerError> {
        let mut wtr = Writer::from_path(path)?;

        let all_keys: BTreeSet<&String> =
            self.data.iter().flat_map(|r| r.items.keys()).collect();
        let headers: Vec<&String> = all_keys.into_iter().collect();

        wtr.write_record(&headers)?;

        for record in &self.data {
            let row: Vec<String> = headers
                .iter()
                .map(|key| {
                    record
                        .items
                        .get(*key)
                        .map(|v| v.to_string())
                        .unwrap_or_default()
                })
                .collect();
            wtr.write_record(&row)?;
        }

        wtr.flush()?;

        Ok(())
    }
}

impl Logger for CsvLogger {
    fn log(&mut self, data: LogItem) {
        if self.to_stdout {
            data.print();
        }

        if data.is_empty() {
            return;
        }

        for key in data.items.keys() {
            if !self.keys.contains(key) {
                self.keys.push(key.clone());
            }
        }

        self.data.push(data);
    }

    fn dump(&self) -> Result<(), LoggerError> {
        info!(
            "Dumping logs to {:?}. {} items to dump",
            self.dump_path,
            self.data.len()
        );

        self.write_csv(&self.dump_path)?;

        if let Err(err) = create_plots(&self.data, &self.keys, &self.dump_dir()) {
            warn!("couldn't create plots: {err}");
        }

        Ok(())
    }

    fn check_can_log(&self, try_to_fix: bool) -> Result<(), LoggerError> {
        let dir = self.dump_dir();

        if self.dump_path.exists() && !self.overwrite {
            Err(LoggerError::AlreadyExists(self.dump_path.clone()))
        } else if self.dump_path.extension() != Some(OsStr::new("csv")) {
            Err(LoggerError::NotCsv(self.dump_path.clone()))
        } else if !dir.exists() {
            if try_to_fix {
                std::fs::create_dir_all(&dir)
                    .map_err(|source| LoggerError::CreateDir { path: dir, source })
            } else {
                Err(LoggerError::MissingDir(dir))
            }
        } else {
            Ok(())
        }
    }

    fn print_last(&self) {
        println!("Last Log:");
        if let Some(log) = self.data.last() {
            for (key, record) in &log.items {
                println!("\t{key}: {record}");
            }
        }
    }
}

/// Draws one png per key in `create`, plotting the key's value against
/// its record index. Non-numeric keys are skipped.
pub fn create_plots(
    data: &[LogItem],
    create: &[String],
    dir: &Path,
) -> Result<(), Box<dyn Error>> {
    for yvar in create {
        let plot_data: Vec<(f32, f32)> = data
            .iter()
            .enumerate()
            .filter_map(|(idx, point)| {
                point
                    .items
                    .get(yvar.as_str())
                    .and_then(LogData::as_f32)
                    .map(|y| (idx as f32, y))
            })
            .collect();

        if plot_data.is_empty() {
            continue;
        }

        let xmax = plot_data
            .iter()
            .map(|(x, _)| *x)
            .fold(1.0_f32, f32::max);
        let ymin = plot_data.iter().map(|(_, y)| *y).fold(0.0_f32, f32::min);
        let mut ymax = plot_data.iter().map(|(_, y)| *y).fold(f32::MIN, f32::max);
        if ymax <= ymin {
            ymax = ymin + 1.0;
        }

        let path = dir.join(format!("{yvar}.png"));

        let root_area = BitMapBackend::new(&path, (600, 400)).into_drawing_area();
        root_area.fill(&WHITE)?;

        let mut ctx = ChartBuilder::on(&root_area)
            .set_label_area_size(LabelAreaPosition::Left, 40)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .caption(yvar.as_str(), ("sans-serif", 40))
            .build_cartesian_2d(0.0..xmax, ymin..ymax)?;

        ctx.configure_mesh().draw()?;

        ctx.draw_series(LineSeries::new(plot_data, &GREEN))?;

        root_area.present()?;
    }

    Ok(())
}
