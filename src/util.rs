use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Context};
use clap::ArgMatches;
use serde::Serialize;
use serde_json::Value;

use crate::error::ColoringError;


/** summary of repeated runs of a solver */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingSummary {
    /// number of runs
    pub repetitions: usize,
    /// mean wall-clock time (seconds)
    pub mean_time: f64,
    /// standard deviation of the wall-clock time (seconds)
    pub std_time: f64,
    /// number of runs that found a coloring
    pub nb_successes: usize,
}

impl TimingSummary {
    /** builds the summary from the time (seconds) and outcome of each run */
    pub fn from_runs(runs:&[(f64, bool)]) -> Self {
        let repetitions = runs.len();
        let nb_successes = runs.iter().filter(|(_,found)| *found).count();
        if repetitions == 0 {
            return Self { repetitions, mean_time: 0., std_time: 0., nb_successes };
        }
        let mean_time = runs.iter().map(|(t,_)| t).sum::<f64>() / repetitions as f64;
        let variance = runs.iter()
            .map(|(t,_)| (t - mean_time).powi(2))
            .sum::<f64>() / repetitions as f64;
        Self { repetitions, mean_time, std_time: variance.sqrt(), nb_successes }
    }
}

/** runs `solver` `repetitions` times, measuring its wall-clock time.
`solver` returns true iff it found a coloring. */
pub fn time_test<F>(mut solver:F, repetitions:usize) -> TimingSummary
where F:FnMut() -> bool {
    let runs:Vec<(f64, bool)> = (0..repetitions).map(|_| {
        let t_start = Instant::now();
        let found = solver();
        (t_start.elapsed().as_secs_f64(), found)
    }).collect();
    TimingSummary::from_runs(&runs)
}


/** parses the value of a command line argument, with a readable error */
pub fn parse_arg<T>(main_args:&ArgMatches, name:&str) -> anyhow::Result<T>
where T:std::str::FromStr, T::Err:std::fmt::Display {
    let value = main_args.value_of(name)
        .with_context(|| format!("missing argument '{}'", name))?;
    value.parse::<T>()
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("unable to parse '{}' ({})", name, value))
}

/** parses an optional command line argument */
pub fn parse_optional_arg<T>(main_args:&ArgMatches, name:&str) -> anyhow::Result<Option<T>>
where T:std::str::FromStr, T::Err:std::fmt::Display {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(_) => parse_arg(main_args, name).map(Some),
    }
}

/** file name of the j-th generated instance of size n */
pub fn instance_filename(dir:&str, n:usize, j:usize) -> String {
    Path::new(dir)
        .join(format!("graph_map_instance_{:05}_{}.json", n, j))
        .to_string_lossy()
        .to_string()
}

/** json files of a directory, sorted by name (instance names sort by size) */
pub fn instance_files(dir:&str) -> Result<Vec<String>, ColoringError> {
    let mut res = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map_or(false, |e| e == "json") {
            res.push(path.to_string_lossy().to_string());
        }
    }
    res.sort();
    Ok(res)
}

/** exports statistics to a json file */
pub fn export_stats(filename:&str, stats:&Value) -> Result<(), ColoringError> {
    fs::write(filename, serde_json::to_string_pretty(stats)?)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_summary() {
        let s = TimingSummary::from_runs(&[(1., true), (3., false), (2., true)]);
        assert_eq!(s.repetitions, 3);
        assert_eq!(s.nb_successes, 2);
        assert!((s.mean_time - 2.).abs() < 1e-12);
        assert!((s.std_time - (2f64/3.).sqrt()).abs() < 1e-12);
        let empty = TimingSummary::from_runs(&[]);
        assert_eq!(empty.nb_successes, 0);
        assert!(empty.mean_time.abs() < 1e-12);
    }

    #[test]
    fn test_time_test() {
        let mut calls = 0;
        let s = time_test(|| { calls += 1; calls % 2 == 0 }, 5);
        assert_eq!(s.repetitions, 5);
        assert_eq!(s.nb_successes, 2);
        assert!(s.mean_time >= 0.);
    }

    #[test]
    fn test_parse_args() {
        use clap::{App, Arg};
        let app = App::new("solve")
            .arg(Arg::with_name("colors").short("k").takes_value(true))
            .arg(Arg::with_name("seed").long("seed").takes_value(true));
        let main_args = app.get_matches_from(vec!["solve", "-k", "x3"]);
        let err = parse_arg::<usize>(&main_args, "colors").unwrap_err();
        assert!(format!("{:#}", err).contains("unable to parse 'colors' (x3)"));
        assert_eq!(parse_optional_arg::<u64>(&main_args, "seed").unwrap(), None);
        assert!(parse_arg::<u64>(&main_args, "seed").is_err());
        let app = App::new("solve")
            .arg(Arg::with_name("colors").short("k").takes_value(true))
            .arg(Arg::with_name("seed").long("seed").takes_value(true));
        let main_args = app.get_matches_from(vec!["solve", "-k", "3", "--seed", "42"]);
        assert_eq!(parse_arg::<usize>(&main_args, "colors").unwrap(), 3);
        assert_eq!(parse_optional_arg::<u64>(&main_args, "seed").unwrap(), Some(42));
    }

    #[test]
    fn test_instance_filename() {
        assert!(instance_filename("data", 35, 2).ends_with("graph_map_instance_00035_2.json"));
    }
}
