use clap::Parser;
use regrid::field::{Field, FieldMut};
use regrid::grid::Grid;
use regrid::index_space::OverlapWindow;
use regrid::prolong::{spread_coarse_to_fine, spread_coarse_to_fine_ghost_zone};
use regrid::restrict::condense_fine_to_coarse;

#[derive(Debug, Parser)]
struct Opts {
    /// Coarse cells per axis
    #[clap(short = 'n', long, default_value = "256")]
    num_cells: usize,

    /// Refinement factor per axis
    #[clap(short = 'f', long, default_value = "4")]
    factor: usize,

    /// Ghost cell width for the halo refresh
    #[clap(short = 'g', long, default_value = "2")]
    ghost: usize,

    /// Components per tuple
    #[clap(short = 'c', long, default_value = "5")]
    num_fields: usize,
}

fn main() {
    simple_logger::SimpleLogger::new().init().unwrap();

    let opts = Opts::parse();
    println!("{:?}", opts);

    let coarse_grid = Grid::new(
        2,
        vec![opts.num_cells + 1; 2],
        vec![0.0; 2],
        vec![1.0 / opts.num_cells as f64; 2],
    )
    .unwrap();
    let fine_grid = coarse_grid.refined_by(&[opts.factor; 2]).unwrap();

    log::info!(
        "coarse grid {:?} cells, fine grid {:?} cells, cell measure ratio {}",
        coarse_grid.cell_counts(),
        fine_grid.cell_counts(),
        coarse_grid.cell_measure() / fine_grid.cell_measure(),
    );

    let shape = coarse_grid.cell_shape().unwrap();
    let window = OverlapWindow::new(vec![0..opts.num_cells; 2]).unwrap();
    let factors = [opts.factor; 2];

    let coarse_data: Vec<f64> = (0..shape.num_cells() * opts.num_fields)
        .map(|n| n as f64)
        .collect();
    let mut fine_data = vec![0.0; shape.num_cells() * factors[0] * factors[1] * opts.num_fields];

    let start = std::time::Instant::now();
    spread_coarse_to_fine(
        Field::new(&coarse_data, opts.num_fields).unwrap(),
        &shape,
        &mut FieldMut::new(&mut fine_data, opts.num_fields).unwrap(),
        &window,
        &factors,
    )
    .unwrap();
    let spread = start.elapsed().as_secs_f64();

    let mut condensed = vec![0.0; coarse_data.len()];
    let start = std::time::Instant::now();
    condense_fine_to_coarse(
        &shape,
        Field::new(&fine_data, opts.num_fields).unwrap(),
        &window,
        &factors,
        &mut FieldMut::new(&mut condensed, opts.num_fields).unwrap(),
    )
    .unwrap();
    let condense = start.elapsed().as_secs_f64();

    let scale = (factors[0] * factors[1]) as f64;
    let conserved = condensed
        .iter()
        .zip(&coarse_data)
        .all(|(sum, value)| *sum == value * scale);
    assert!(conserved, "round trip lost mass");

    let ghost_coarse = vec![0.0; (opts.num_cells + 2 * opts.ghost).pow(2) * opts.num_fields];
    let mut ghost_fine = vec![
        0.0;
        (opts.num_cells * opts.factor + 2 * opts.ghost).pow(2) * opts.num_fields
    ];
    let start = std::time::Instant::now();
    spread_coarse_to_fine_ghost_zone(
        Field::new(&ghost_coarse, opts.num_fields).unwrap(),
        &shape,
        &mut FieldMut::new(&mut ghost_fine, opts.num_fields).unwrap(),
        &window,
        &factors,
        opts.ghost,
    )
    .unwrap();
    let refresh = start.elapsed().as_secs_f64();

    let fine_zones = fine_data.len() / opts.num_fields;
    println!();
    println!("fine zones ............ {}", fine_zones);
    println!("spread ................ {:.6}s ({:.1} Mzones/s)", spread, fine_zones as f64 / spread * 1e-6);
    println!("condense .............. {:.6}s ({:.1} Mzones/s)", condense, fine_zones as f64 / condense * 1e-6);
    println!("halo refresh .......... {:.6}s", refresh);
    println!("round trip conserved .. {}", conserved);
}
