use anyhow::Result;
use priority_flood::{FloodParams, fill_channels, merge_channels, split_channels};

fn main() -> Result<()> {
    // 3x3 RGB image, pixel-interleaved; every channel has a pit in the middle
    let pixels: Vec<u8> = vec![
        200, 90, 40,  200, 90, 40,  200, 90, 40,
        200, 90, 40,   10,  5,  1,  200, 90, 40,
        200, 90, 40,  200, 90, 40,  200, 90, 40,
    ];
    let mut bands = split_channels(&pixels, 3, 3, 3)?;
    let stats = fill_channels(&mut bands, &FloodParams::default())?;
    for (i, s) in stats.iter().enumerate() {
        println!("band {i}: raised {} cells by {}", s.raised, s.volume);
    }
    let filled = merge_channels(&bands)?;
    println!("centre pixel is now {:?}", &filled[12..15]);

    Ok(())
}
