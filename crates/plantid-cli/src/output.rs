//! Output formatting module

use plantid_types::{OutputFormat, Plant, Result};

pub fn output_result(output_format: OutputFormat, plant: &Plant) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(plant)?;
        println!("{}", content);
    } else {
        // Table format
        println!("\nIdentification Result");
        println!("=====================");
        println!("Name:        {}", plant.name);
        println!("Description: {}", plant.description);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_is_valid() {
        let plant = Plant {
            name: "Rose".to_string(),
            description: "A fragrant flowering shrub.".to_string(),
        };
        let json = serde_json::to_string_pretty(&plant).unwrap();
        let reloaded: Plant = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, plant);
    }
}
