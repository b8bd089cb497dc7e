use std::path::PathBuf;

use manilit::manifest::{ManifestError, Result, Schema};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long = "type")]
	pub type_name: Option<String>,
}

/// Print a schema summary, optionally with one record's fields.
pub fn run(args: Args) -> Result<()> {
	let schema = Schema::load(&args.path)?;

	println!("path: {}", args.path.display());
	println!("types: {}", schema.records().len());
	println!("kinds: {}", schema.kinds().len());
	for binding in schema.kinds() {
		println!("  {}/{} -> {}", binding.api_version, binding.kind, binding.root);
	}

	if let Some(name) = args.type_name {
		let record = schema.record(&name).ok_or(ManifestError::SchemaUnknownType { name })?;
		println!("type: {}", record.name);
		println!("field_count: {}", record.fields.len());
		for field in &record.fields {
			let inline = if field.inline { " inline" } else { "" };
			println!("  {} {} key={}{}", field.name, field.ty, field.key, inline);
		}
	}

	Ok(())
}
