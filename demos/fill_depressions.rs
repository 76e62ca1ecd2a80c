use anyhow::Result;
use ndarray::{Array2, array};
use priority_flood::{Connectivity, FloodParams, fill_depressions, find_pits};

fn main() -> Result<()> {
    let mut dem: Array2<f64> = array![
        [3.0, 3.0, 3.0, 7.0],
        [3.0, 2.0, 4.0, 2.0],
        [5.0, 6.0, 8.0, 0.0],
    ];
    println!("Filling depressions on {dem}");
    let stats = fill_depressions(&mut dem, &FloodParams::default())?;
    println!("now is {dem}, {} cells raised", stats.raised);

    let mut dem: Array2<f64> = array![
        [10.0, 12.0, 10.0, 10.0],
        [12.0, 1.0,  10.0, 12.0],
        [10.0, 12.0, 10.0, 11.0],
    ];
    println!("Pits in {dem}: {:?}", find_pits(dem.view(), Connectivity::Four));
    let params = FloodParams { connectivity: Connectivity::Eight, verbose: false };
    fill_depressions(&mut dem, &params)?;
    println!("now is {dem}");

    Ok(())
}
