use std::path::Path;

use anyhow::{Context, Result};
use clap::{App, load_yaml};
use log::info;
use serde_json::json;

use dogs_mapcolor::instance::read_instance;
use dogs_mapcolor::search::Method;
use dogs_mapcolor::search::backtracking::InferenceType;
use dogs_mapcolor::util::{export_stats, instance_files, parse_arg, parse_optional_arg, time_test};


/** measures the mean run time, its standard deviation, and the number of successes of every
method, on every instance of a directory, for each number of colors. */
pub fn main() -> Result<()> {
    env_logger::init();
    // parse arguments
    let yaml = load_yaml!("benchmark.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let inst_dir = main_args.value_of("instances").unwrap_or(".");
    let output = main_args.value_of("output").unwrap_or(inst_dir);
    let repetitions:usize = parse_arg(&main_args, "repetitions")?;
    let plain_limit:usize = parse_arg(&main_args, "plain_limit")?;
    let seed:Option<u64> = parse_optional_arg(&main_args, "seed")?;
    let colors:Vec<usize> = main_args.value_of("colors").unwrap_or("3,4")
        .split(',')
        .map(|e| e.trim().parse::<usize>())
        .collect::<Result<_, _>>()
        .context("unable to parse the numbers of colors")?;
    let files = instance_files(inst_dir)
        .with_context(|| format!("unable to list instances of {}", inst_dir))?;
    let mut rng = match seed {
        None => fastrand::Rng::new(),
        Some(s) => fastrand::Rng::with_seed(s),
    };
    println!("{} instances, {} repetitions", files.len(), repetitions);
    for k in colors {
        let mut results = Vec::with_capacity(files.len());
        for (i, filename) in files.iter().enumerate() {
            let inst = read_instance(filename)
                .with_context(|| format!("unable to read instance {}", filename))?;
            let mut row = serde_json::Map::new();
            for method in Method::all().iter() {
                if *method == Method::Backtracking(InferenceType::Plain) && i >= plain_limit {
                    row.insert(method.to_string(), serde_json::Value::Null);
                    continue;
                }
                let mut error = None;
                let summary = time_test(|| match method.solve(&inst, k, &mut rng) {
                    Ok(sol) => sol.found,
                    Err(e) => { error = Some(e); false },
                }, repetitions);
                if let Some(e) = error { return Err(e.into()); }
                info!("{} k={} {}: {:?}", filename, k, method, summary);
                println!(
                    "k={} {:<45}{:<18}{:>10.4}s ±{:>8.4}  {:>3}/{}",
                    k, filename, method.to_string(), summary.mean_time, summary.std_time,
                    summary.nb_successes, summary.repetitions
                );
                row.insert(method.to_string(), serde_json::to_value(&summary)?);
            }
            results.push(json!({
                "inst_name": filename,
                "nb_vertices": inst.nb_vertices(),
                "nb_edges": inst.nb_edges(),
                "results": row,
            }));
        }
        let filename = Path::new(output)
            .join(format!("test_results_{}.json", k))
            .to_string_lossy()
            .to_string();
        export_stats(&filename, &json!({ "k": k, "repetitions": repetitions, "instances": results }))
            .with_context(|| format!("unable to write {}", filename))?;
    }
    Ok(())
}
