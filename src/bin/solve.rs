use std::time::Instant;

use anyhow::{Context, Result};
use clap::{App, load_yaml};
use serde_json::json;

use dogs_mapcolor::color::{checker, CheckerResult, Graph};
use dogs_mapcolor::instance::{read_instance, write_solution};
use dogs_mapcolor::search::Method;
use dogs_mapcolor::util::{export_stats, parse_arg, parse_optional_arg};


/** solves a map coloring instance with the given method and number of colors */
pub fn main() -> Result<()> {
    env_logger::init();
    // parse arguments
    let yaml = load_yaml!("solve.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let k:usize = parse_arg(&main_args, "colors")?;
    let method:Method = parse_arg(&main_args, "method")?;
    let seed:Option<u64> = parse_optional_arg(&main_args, "seed")?;
    let (inst_name, inst) = match main_args.value_of("instance") {
        Some(filename) if !main_args.is_present("toy") => {
            let inst = read_instance(filename)
                .with_context(|| format!("unable to read instance {}", filename))?;
            (filename.to_string(), inst)
        },
        _ => ("australia".to_string(), Graph::australia()),
    };
    println!("reading instance: {}...", inst_name);
    inst.display_statistics();
    println!("=======================");
    // solve it
    let mut rng = match seed {
        None => fastrand::Rng::new(),
        Some(s) => fastrand::Rng::with_seed(s),
    };
    let t_start = Instant::now();
    let solution = method.solve(&inst, k, &mut rng)?;
    let duration = t_start.elapsed().as_secs_f64();
    println!("{} took {:.3} seconds (k={}). found: {}", method, duration, k, solution.found);
    if solution.found {
        match checker(&inst, &solution.colors, k) {
            CheckerResult::Ok(nb_colors) => println!("valid solution using {} colors", nb_colors),
            e => println!("invalid solution (reason: {:?})", e),
        }
    }
    for (v,label) in solution.labels().iter().enumerate() {
        println!("\t{:>10}: {}", inst.name(v), label);
    }
    // export statistics and solution
    if let Some(filename) = main_args.value_of("perf") {
        let stats = json!({
            "inst_name": inst_name,
            "method": method.to_string(),
            "k": k,
            "found": solution.found,
            "time_searched": duration,
            "stats": solution.stats,
        });
        export_stats(filename, &stats)
            .with_context(|| format!("unable to write {}", filename))?;
    }
    if let Some(filename) = main_args.value_of("solution") {
        write_solution(filename, &solution)
            .with_context(|| format!("unable to write {}", filename))?;
    }
    Ok(())
}
