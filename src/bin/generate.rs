use std::fs;

use anyhow::{Context, Result};
use clap::{App, load_yaml};
use rand::SeedableRng;
use rand::rngs::StdRng;

use dogs_mapcolor::planar::generate_planar_graph;
use dogs_mapcolor::instance::write_instance;
use dogs_mapcolor::util::{instance_filename, parse_arg, parse_optional_arg};


/** generates batches of random planar maps, for every size from min to max */
pub fn main() -> Result<()> {
    env_logger::init();
    // parse arguments
    let yaml = load_yaml!("generate.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let output = main_args.value_of("output").unwrap_or(".");
    let min:usize = parse_arg(&main_args, "min")?;
    let max:usize = parse_arg(&main_args, "max")?;
    let step:usize = parse_arg(&main_args, "step")?;
    let count:usize = parse_arg(&main_args, "count")?;
    let seed:Option<u64> = parse_optional_arg(&main_args, "seed")?;
    let mut rng = match seed {
        None => StdRng::from_entropy(),
        Some(s) => StdRng::seed_from_u64(s),
    };
    fs::create_dir_all(output)
        .with_context(|| format!("unable to create directory {}", output))?;
    // generate
    for n in (min.max(1)..=max).step_by(step.max(1)) {
        for j in 0..count {
            let g = generate_planar_graph(n, &mut rng)?;
            let filename = instance_filename(output, n, j);
            write_instance(&filename, &g)
                .with_context(|| format!("unable to write {}", filename))?;
            println!("{:<50}{:>8} vertices{:>8} edges", filename, g.nb_vertices(), g.nb_edges());
        }
    }
    Ok(())
}
