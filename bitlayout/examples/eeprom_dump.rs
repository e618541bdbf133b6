//! Example that builds a small EEPROM layout, writes a configuration image
//! and dumps it back field by field.
//!
//! Run with: `cargo run --example eeprom_dump`

use bitlayout::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let schema = Schema::new(
        Dialect::EepromV1,
        vec![
            FieldDescriptor::uint("device_id", 12, 0, 4095),
            FieldDescriptor::reserved("pad", 4),
            FieldDescriptor::bool("enabled"),
            FieldDescriptor::enumeration(
                "base_station_mode",
                8,
                vec![
                    (0, "NORMAL".to_string()),
                    (1, "REPEATER".to_string()),
                    (2, "SNIFFER".to_string()),
                ],
            ),
            FieldDescriptor::int("temperature_offset", 8, -40, 40),
            FieldDescriptor::byte_array("aes_key", 8),
            FieldDescriptor::group(
                "channels",
                3,
                vec![
                    FieldDescriptor::uint("brightness", 7, 0, 100),
                    FieldDescriptor::bool("inverted"),
                ],
            ),
        ],
    )?;

    println!(
        "Layout: {} bits ({} bytes)",
        schema.bit_len(),
        schema.byte_len()
    );
    for field in offsets(&schema, 0) {
        println!(
            "  {:<28} bits {:>3}..{:<3}",
            field.path,
            field.start_bit,
            field.start_bit + field.len_bits
        );
    }

    let channels: Vec<FieldMap> = (0..3)
        .map(|i| {
            FieldMap::from([
                ("brightness".to_string(), DecodedValue::UInt(30 * (i + 1))),
                ("inverted".to_string(), DecodedValue::Bool(i == 1)),
            ])
        })
        .collect();
    let values = FieldMap::from([
        ("device_id".to_string(), DecodedValue::UInt(0x2A7)),
        ("enabled".to_string(), DecodedValue::Bool(true)),
        (
            "base_station_mode".to_string(),
            DecodedValue::Enum {
                value: 1,
                symbol: "REPEATER".to_string(),
            },
        ),
        ("temperature_offset".to_string(), DecodedValue::Int(-3)),
        (
            "aes_key".to_string(),
            DecodedValue::Bytes(vec![0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]),
        ),
        ("channels".to_string(), DecodedValue::Groups(channels)),
    ]);

    let mut image = vec![0u8; schema.byte_len()];
    let bits = encode(&schema, &values, &mut image, 0)?;
    println!("\nEncoded {} bits", bits);
    println!("Image: {}", to_hex(&image));

    println!("\nDecoded:");
    for (id, value) in decode(&schema, &image, 0)? {
        println!("  {:<20} = {:?}", id, value);
    }

    Ok(())
}
