
use atajos_lib::config::ConfigurationValue;
use atajos_lib::topology::{Endpoint,EndpointKind};

pub fn number(value:f64) -> ConfigurationValue
{
	ConfigurationValue::Number(value)
}

pub fn literal(value:&str) -> ConfigurationValue
{
	ConfigurationValue::Literal(value.to_string())
}

pub fn mesh2d(rows:usize, columns:usize) -> ConfigurationValue
{
	ConfigurationValue::Object("Mesh2D".to_string(),vec![
		("rows".to_string(),number(rows as f64)),
		("columns".to_string(),number(columns as f64)),
	])
}

pub fn cube3d(side:usize) -> ConfigurationValue
{
	ConfigurationValue::Object("Cube3D".to_string(),vec![
		("width".to_string(),number(side as f64)),
		("height".to_string(),number(side as f64)),
		("depth".to_string(),number(side as f64)),
	])
}

pub fn ring() -> ConfigurationValue
{
	ConfigurationValue::Object("Ring".to_string(),vec![])
}

pub struct ConfigBuilder
{
	pub routers: usize,
	pub topology: ConfigurationValue,
	pub traffic: ConfigurationValue,
	pub budget: f64,
	pub selection: ConfigurationValue,
	pub extra: Vec<(String,ConfigurationValue)>,
}

pub fn create_config(builder:ConfigBuilder) -> ConfigurationValue
{
	let mut pairs = vec![
		("routers".to_string(),number(builder.routers as f64)),
		("topology".to_string(),builder.topology),
		("link_latency".to_string(),number(1.0)),
		("router_latency".to_string(),number(1.0)),
		("traffic".to_string(),builder.traffic),
		("budget".to_string(),number(builder.budget)),
		("selection".to_string(),builder.selection),
		("buffers_per_vc".to_string(),number(4.0)),
		("memory_size".to_string(),number(1048576.0)),
	];
	pairs.extend(builder.extra);
	ConfigurationValue::Object("Config".to_string(),pairs)
}

pub fn create_endpoints(caches:usize, directories:usize, dmas:usize) -> Vec<Endpoint>
{
	let mut endpoints = Vec::with_capacity(caches+directories+dmas);
	for i in 0..caches
	{
		endpoints.push(Endpoint{name:format!("cache{}",i),kind:EndpointKind::Cache});
	}
	for i in 0..directories
	{
		endpoints.push(Endpoint{name:format!("dir{}",i),kind:EndpointKind::Directory});
	}
	for i in 0..dmas
	{
		endpoints.push(Endpoint{name:format!("dma{}",i),kind:EndpointKind::Dma});
	}
	endpoints
}
