/*!

Assembly of the router network handed to the simulation framework.

A [Topology] names the shape of the base graph. Construction creates the routers, attaches the
external endpoints, wires the base grid adjacencies, and finally the long-range pairs chosen by
the [longrange](crate::longrange) selection, every link carrying its direction labels, routing
weight and permitted turn classes. The returned [Network] is owned by the caller; nothing here
mutates it afterwards.

*/

pub mod cartesian;

use std::path::PathBuf;
use ::rand::rngs::StdRng;

use quantifiable_derive::Quantifiable;//the derive macro
use self::cartesian::CartesianData;
use crate::config::ConfigurationValue;
use crate::direction::{SignPattern,direction_word,NUM_TURN_CLASSES};
use crate::error::Error;
use crate::longrange::{select_links,LinkSelection,Matching};
use crate::traffic::{build_synthetic,load_traffic_file,TrafficOptions,TrafficPattern,TrafficSource};
use crate::{error,match_object_panic};

/// Some things most uses of the topology module will use.
pub mod prelude
{
	pub use super::{build_network,register_nodes,Config,Endpoint,EndpointKind,Network,NodeRegistry,Topology};
	pub use ::rand::rngs::StdRng;
}

///The shape of the base router graph. Every variant builds through the same construction path;
///they differ in their block of coordinates, their axis weights and whether long-range links
///apply.
#[derive(Debug,Quantifiable)]
pub enum Topology
{
	///A rows×columns grid with corners. Base axis weights 1 (x) and 2 (y); long-range weight 3.
	Mesh2D{
		rows: usize,
		columns: usize,
	},
	///A width×height×depth block. Base axis weights 1, 2 and 3; long-range weight 4.
	Cube3D{
		width: usize,
		height: usize,
		depth: usize,
	},
	///A closed cycle over all routers, wrap-around included. All links weight 1. The ring keeps
	///its plain wiring: no long-range links are added.
	Ring,
}

impl Topology
{
	pub fn new(cv:&ConfigurationValue) -> Topology
	{
		if let &ConfigurationValue::Object(ref cv_name, ref _cv_pairs) = cv
		{
			match cv_name.as_ref()
			{
				"Mesh2D" =>
				{
					let mut rows = None;
					let mut columns = None;
					match_object_panic!(cv,"Mesh2D",value,
						"rows" => rows = Some(value.as_usize().expect("bad value for rows")),
						"columns" => columns = Some(value.as_usize().expect("bad value for columns")),
					);
					let rows = rows.expect("There were no rows");
					let columns = columns.expect("There were no columns");
					Topology::Mesh2D{rows,columns}
				},
				"Cube3D" =>
				{
					let mut width = None;
					let mut height = None;
					let mut depth = None;
					match_object_panic!(cv,"Cube3D",value,
						"width" => width = Some(value.as_usize().expect("bad value for width")),
						"height" => height = Some(value.as_usize().expect("bad value for height")),
						"depth" => depth = Some(value.as_usize().expect("bad value for depth")),
					);
					let width = width.expect("There were no width");
					let height = height.expect("There were no height");
					let depth = depth.expect("There were no depth");
					Topology::Cube3D{width,height,depth}
				},
				"Ring" =>
				{
					match_object_panic!(cv,"Ring",_value,);
					Topology::Ring
				},
				_ => panic!("Unknown topology {}",cv_name),
			}
		}
		else
		{
			panic!("Trying to create a topology from a non-Object");
		}
	}
	///Check the sides against the router count before anything is built.
	pub fn check_shape(&self, router_count:usize) -> Result<(),Error>
	{
		match self
		{
			&Topology::Mesh2D{rows,columns} =>
			{
				if router_count==0 || rows==0 || rows>router_count || rows*columns!=router_count
				{
					return Err(error!(shape_mismatch, vec![rows,columns], router_count));
				}
			},
			&Topology::Cube3D{width,height,depth} =>
			{
				if router_count==0 || width*height*depth!=router_count
				{
					return Err(error!(shape_mismatch, vec![width,height,depth], router_count));
				}
			},
			&Topology::Ring =>
			{
				if router_count==0
				{
					return Err(error!(shape_mismatch, vec![], router_count));
				}
			},
		}
		Ok(())
	}
	///The coordinate block of the routers, the x axis fastest.
	pub fn cartesian_data(&self, router_count:usize) -> CartesianData
	{
		match self
		{
			&Topology::Mesh2D{rows,columns} => CartesianData::new(&[columns,rows]),
			&Topology::Cube3D{width,height,depth} => CartesianData::new(&[width,height,depth]),
			&Topology::Ring => CartesianData::new(&[router_count]),
		}
	}
	pub fn dimensions(&self) -> usize
	{
		match self
		{
			&Topology::Mesh2D{..} => 2,
			&Topology::Cube3D{..} => 3,
			&Topology::Ring => 1,
		}
	}
	///The routing weight of long-range links: one more than the heaviest base axis.
	pub fn express_weight(&self) -> usize
	{
		self.dimensions()+1
	}
}

///The kind of external controller behind an endpoint.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Quantifiable)]
pub enum EndpointKind
{
	Cache,
	Directory,
	Dma,
}

///An external controller to be wired to some router. Owned by exactly one router after
///construction.
#[derive(Clone,Debug,Quantifiable)]
pub struct Endpoint
{
	pub name: String,
	pub kind: EndpointKind,
}

///A router of the constructed network.
#[derive(Debug,Quantifiable)]
pub struct Router
{
	pub index: usize,
	pub latency: u64,
	///The other end of this router's long-range link, if it got one.
	pub express_partner: Option<usize>,
	///Buffer depth per turn class. The two classes of the router's long-range link get double
	///depth; the rest keep the configured base depth.
	pub vc_buffers: Vec<usize>,
}

///A link between an endpoint and its router.
#[derive(Debug,Quantifiable)]
pub struct ExternalLink
{
	pub link_id: usize,
	///Index into the endpoint list given to the construction.
	pub endpoint: usize,
	pub router: usize,
	pub latency: u64,
}

///A directed router-to-router link.
#[derive(Debug,Quantifiable)]
pub struct InternalLink
{
	pub link_id: usize,
	pub source: usize,
	pub destination: usize,
	pub source_outport: String,
	pub destination_inport: String,
	pub latency: u64,
	///Priority hint for the host's routing: lower weights are preferred.
	pub weight: usize,
	///The two turn classes packets on this link may use.
	pub vc_classes: [usize;2],
}

///Everything the construction hands over to the simulation framework, ordered as built.
#[derive(Debug,Quantifiable)]
pub struct Network
{
	pub routers: Vec<Router>,
	pub external_links: Vec<ExternalLink>,
	pub internal_links: Vec<InternalLink>,
}

///The immutable configuration of one construction call, threaded explicitly through every stage.
#[derive(Debug)]
pub struct Config
{
	pub router_count: usize,
	pub topology: Topology,
	pub link_latency: u64,
	pub router_latency: u64,
	pub traffic: TrafficSource,
	pub traffic_options: TrafficOptions,
	///Total wire length available to long-range links.
	pub budget: f64,
	pub selection: LinkSelection,
	///Base buffer depth per turn class and router.
	pub vc_buffer_depth: usize,
	///Total memory to partition evenly among the routers on registration.
	pub memory_size: usize,
}

///Negative identifiers keep their configuration-file meaning of `not set`.
fn optional_router_id(value:&ConfigurationValue) -> Option<usize>
{
	let id = value.as_f64().expect("bad value for a router identifier");
	if id>=0.0 { Some(id as usize) } else { None }
}

impl Config
{
	pub fn new(cv:&ConfigurationValue) -> Config
	{
		let mut router_count = None;
		let mut topology = None;
		let mut link_latency = None;
		let mut router_latency = None;
		let mut traffic = None;
		let mut traffic_file = None;
		let mut single_dest = None;
		let mut single_sender = None;
		let mut hotspots = vec![];
		let mut hotspot_factor = 0.0;
		let mut budget = 0.0;
		let mut selection = LinkSelection::BestEffort;
		let mut vc_buffer_depth = None;
		let mut memory_size = None;
		match_object_panic!(cv,"Config",value,
			"routers" => router_count = Some(value.as_usize().expect("bad value for routers")),
			"topology" => topology = Some(Topology::new(value)),
			"link_latency" => link_latency = Some(value.as_usize().expect("bad value for link_latency") as u64),
			"router_latency" => router_latency = Some(value.as_usize().expect("bad value for router_latency") as u64),
			"traffic" => traffic = Some(value.as_str().expect("bad value for traffic").to_string()),
			"traffic_file" => traffic_file = Some(PathBuf::from(value.as_str().expect("bad value for traffic_file"))),
			"single_dest_id" => single_dest = optional_router_id(value),
			"single_sender_id" => single_sender = optional_router_id(value),
			"hotspots" => hotspots = value.as_array().expect("bad value for hotspots")
				.iter().map(|v|v.as_usize().expect("bad value in hotspots")).collect(),
			"hotspot_factor" => hotspot_factor = value.as_f64().expect("bad value for hotspot_factor"),
			"budget" => budget = value.as_f64().expect("bad value for budget"),
			"selection" => selection = match value.as_str().expect("bad value for selection")
			{
				"best_effort" => LinkSelection::BestEffort,
				"random" => LinkSelection::Random,
				other => panic!("Unknown link selection {}",other),
			},
			"buffers_per_vc" => vc_buffer_depth = Some(value.as_usize().expect("bad value for buffers_per_vc")),
			"memory_size" => memory_size = Some(value.as_usize().expect("bad value for memory_size")),
		);
		//an explicit file wins over a synthetic pattern name
		let traffic = match traffic_file
		{
			Some(path) => TrafficSource::File(path),
			None => TrafficSource::Synthetic(traffic.unwrap_or_else(||"uniform_random".to_string())),
		};
		Config{
			router_count: router_count.expect("There were no routers"),
			topology: topology.expect("There were no topology"),
			link_latency: link_latency.expect("There were no link_latency"),
			router_latency: router_latency.expect("There were no router_latency"),
			traffic,
			traffic_options: TrafficOptions{single_dest,single_sender,hotspots,hotspot_factor},
			budget,
			selection,
			vc_buffer_depth: vc_buffer_depth.expect("There were no buffers_per_vc"),
			memory_size: memory_size.expect("There were no memory_size"),
		}
	}
}

///Build the whole network: traffic, long-range selection, routers, endpoint attachment, base
///grid links and long-range links, in that order. Fails before any link is built on a bad shape
///and leaves no partial state behind on any error.
pub fn build_network(config:&Config, endpoints:&[Endpoint], rng:&mut StdRng) -> Result<Network,Error>
{
	let n = config.router_count;
	config.topology.check_shape(n)?;
	let space = config.topology.cartesian_data(n);
	let matching = match config.topology
	{
		Topology::Ring => Matching::new(n),
		_ =>
		{
			let traffic = match &config.traffic
			{
				TrafficSource::Synthetic(name) =>
				{
					let pattern = TrafficPattern::from_name(name)?;
					build_synthetic(pattern,&space,&config.traffic_options)?
				},
				TrafficSource::File(path) => load_traffic_file(path,n)?,
			};
			let (matching,_report) = select_links(config.selection,&traffic,&space,config.budget,rng);
			matching
		},
	};
	let routers = build_routers(config,&space,&matching);
	let (external_links,mut link_count) = attach_endpoints(config,endpoints,n)?;
	let mut internal_links = Vec::new();
	match config.topology
	{
		Topology::Ring => ring_links(config,n,&mut link_count,&mut internal_links),
		_ => grid_links(config,&space,&mut link_count,&mut internal_links),
	}
	express_links(config,&space,&matching,&mut link_count,&mut internal_links);
	Ok(Network{
		routers,
		external_links,
		internal_links,
	})
}

fn build_routers(config:&Config, space:&CartesianData, matching:&Matching) -> Vec<Router>
{
	let n = config.router_count;
	let mut routers = Vec::with_capacity(n);
	for index in 0..n
	{
		let mut vc_buffers = vec![config.vc_buffer_depth;NUM_TURN_CLASSES];
		let express_partner = matching.partner(index);
		if let Some(partner) = express_partner
		{
			for class in SignPattern::between(space,index,partner).turn_classes()
			{
				vc_buffers[class-1] *= 2;
			}
		}
		routers.push(Router{
			index,
			latency: config.router_latency,
			express_partner,
			vc_buffers,
		});
	}
	routers
}

///Attach the endpoints round-robin over the routers. The trailing remainder must be DMA engines
///and hangs off router 0.
fn attach_endpoints(config:&Config, endpoints:&[Endpoint], router_count:usize) -> Result<(Vec<ExternalLink>,usize),Error>
{
	let endpoints_per_router = endpoints.len()/router_count;
	let remainder = endpoints.len()%router_count;
	let mut external_links = Vec::with_capacity(endpoints.len());
	let mut link_count = 0;
	for (endpoint_index,endpoint) in endpoints.iter().enumerate()
	{
		let router_index = if endpoint_index < endpoints.len()-remainder
		{
			let level = endpoint_index/router_count;
			assert!(level<endpoints_per_router,"endpoint {} would overfill its router",endpoint_index);
			endpoint_index%router_count
		}
		else
		{
			if endpoint.kind!=EndpointKind::Dma
			{
				return Err(error!(misplaced_endpoint, endpoint_index)
					.with_message(format!("endpoint {} of kind {:?} is in the remainder attached to router 0",endpoint.name,endpoint.kind)));
			}
			0
		};
		external_links.push(ExternalLink{
			link_id: link_count,
			endpoint: endpoint_index,
			router: router_index,
			latency: config.link_latency,
		});
		link_count += 1;
	}
	Ok((external_links,link_count))
}

///Both directions of every base adjacency, axis by axis: the whole positive-direction pass, then
///the negative one. Axis weights are 1, 2, 3 in axis order.
fn grid_links(config:&Config, space:&CartesianData, link_count:&mut usize, internal_links:&mut Vec<InternalLink>)
{
	let n = space.size;
	for axis in 0..space.sides.len()
	{
		let weight = axis+1;
		for positive in [true,false]
		{
			let classes = SignPattern::unit(axis,positive).turn_classes();
			let outport = direction_word(axis,positive);
			let inport = direction_word(axis,!positive);
			for index in 0..n
			{
				let mut coordinates = space.unpack(index);
				if coordinates[axis]+1 >= space.sides[axis]
				{
					continue;
				}
				coordinates[axis] += 1;
				let neighbour = space.pack(&coordinates);
				let (source,destination) = if positive { (index,neighbour) } else { (neighbour,index) };
				internal_links.push(InternalLink{
					link_id: *link_count,
					source,
					destination,
					source_outport: outport.to_string(),
					destination_inport: inport.to_string(),
					latency: config.link_latency,
					weight,
					vc_classes: classes,
				});
				*link_count += 1;
			}
		}
	}
}

///The closed cycle of the ring, wrap-around link included, in both directions.
fn ring_links(config:&Config, router_count:usize, link_count:&mut usize, internal_links:&mut Vec<InternalLink>)
{
	for positive in [true,false]
	{
		let classes = SignPattern::unit(0,positive).turn_classes();
		let outport = direction_word(0,positive);
		let inport = direction_word(0,!positive);
		for index in 0..router_count
		{
			let successor = (index+1)%router_count;
			let (source,destination) = if positive { (index,successor) } else { (successor,index) };
			internal_links.push(InternalLink{
				link_id: *link_count,
				source,
				destination,
				source_outport: outport.to_string(),
				destination_inport: inport.to_string(),
				latency: config.link_latency,
				weight: 1,
				vc_classes: classes,
			});
			*link_count += 1;
		}
	}
}

///Both directions of every long-range pair. The two directions are classified independently from
///their own sign patterns.
fn express_links(config:&Config, space:&CartesianData, matching:&Matching, link_count:&mut usize, internal_links:&mut Vec<InternalLink>)
{
	let dimensions = config.topology.dimensions();
	let weight = config.topology.express_weight();
	for &(i,j) in matching.pairs()
	{
		let forward = SignPattern::between(space,i,j);
		let backward = forward.reversed();
		let forward_label = forward.label(dimensions);
		let backward_label = backward.label(dimensions);
		internal_links.push(InternalLink{
			link_id: *link_count,
			source: i,
			destination: j,
			source_outport: forward_label.clone(),
			destination_inport: backward_label.clone(),
			latency: config.link_latency,
			weight,
			vc_classes: forward.turn_classes(),
		});
		internal_links.push(InternalLink{
			link_id: *link_count+1,
			source: j,
			destination: i,
			source_outport: backward_label,
			destination_inport: forward_label,
			latency: config.link_latency,
			weight,
			vc_classes: backward.turn_classes(),
		});
		*link_count += 2;
	}
}

///The seam to the host's bookkeeping: every router is announced exactly once together with its
///even share of the total memory.
pub trait NodeRegistry
{
	fn register_node(&mut self, router_index:usize, memory:usize);
}

pub fn register_nodes(config:&Config, registry:&mut dyn NodeRegistry)
{
	let share = config.memory_size/config.router_count;
	for router_index in 0..config.router_count
	{
		registry.register_node(router_index,share);
	}
}
