//! Example: Generate an island map
//!
//! Demonstrates the basic usage of the generation pipeline.

use voronoi_island_map::*;

fn main() -> Result<()> {
    println!("Voronoi Island Map Generation Example");
    println!("=====================================\n");

    let config = MapConfigBuilder::new()
        .seed(42)
        .point_count(1000)?
        .relaxation_iterations(2)?
        .land_threshold(0.4)?
        .starting_land(true)
        .build();

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Map Size: {}", config.map_size);
    println!("  Point Count: {}", config.point_count);
    println!("  Relaxation Iterations: {}", config.relaxation_iterations);
    println!();

    println!("Generating map...");
    let mut map = IslandMap::generate(config)?;
    map.finalize()?;
    println!(
        "Generated {} regions, {} corners, {} edges\n",
        map.regions().len(),
        map.corners().len(),
        map.edges().len()
    );

    // Terrain distribution
    println!("Terrain distribution:");
    let mut terrain_counts = std::collections::HashMap::new();
    for region in map.regions() {
        *terrain_counts.entry(region.terrain).or_insert(0usize) += 1;
    }
    let mut sorted_terrain: Vec<_> = terrain_counts.iter().collect();
    sorted_terrain.sort_by_key(|(terrain, _)| format!("{:?}", terrain));
    for (terrain, count) in sorted_terrain {
        let pct = (*count as f32 / map.regions().len() as f32) * 100.0;
        println!("  {:?}: {} ({:.1}%)", terrain, count, pct);
    }

    // Landmasses
    println!("\nLandmasses:");
    for mass in map.land_masses() {
        println!(
            "  #{}: {} regions, max {} steps from ocean",
            mass.id, mass.size, mass.max_steps_from_ocean
        );
    }

    // Spatial query at the map center
    #[cfg(feature = "spatial-index")]
    {
        let center = Vec2::splat(map.config().map_size * 0.5);
        if let Some(region) = map.find_region_at(center) {
            println!(
                "\nRegion at map center: {} ({:?}, elevation {:.2})",
                region.id, region.terrain, region.elevation
            );
        }
    }

    Ok(())
}
