/*!
Tests for the three-dimensional cube and the ring
 */

mod common;
use common::*;

use atajos_lib::topology::{build_network,Config};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn plain_cube_adjacency()
{
	let cv = create_config(ConfigBuilder{
		routers: 27,
		topology: cube3d(3),
		traffic: literal("uniform_random"),
		budget: 0.0,
		selection: literal("best_effort"),
		extra: vec![],
	});
	let config = Config::new(&cv);
	let endpoints = create_endpoints(27,0,0);
	let mut rng = StdRng::seed_from_u64(1);
	let network = build_network(&config,&endpoints,&mut rng).expect("no network built");

	// 9 lines of 2 edges per axis, both directions
	assert_eq!(network.internal_links.len(),108);
	for weight in 1..=3
	{
		assert_eq!(network.internal_links.iter().filter(|l|l.weight==weight).count(),36);
	}
	for link in network.internal_links.iter()
	{
		match (link.source_outport.as_str(),link.weight)
		{
			("East",1) => assert_eq!(link.vc_classes,[1,2]),
			("West",1) => assert_eq!(link.vc_classes,[7,8]),
			("North",2) => assert_eq!(link.vc_classes,[7,8]),
			("South",2) => assert_eq!(link.vc_classes,[4,5]),
			("Up",3) => assert_eq!(link.vc_classes,[7,8]),
			("Down",3) => assert_eq!(link.vc_classes,[3,6]),
			other => panic!("unexpected link {:?} in the plain cube",other),
		}
	}
}

#[test]
fn cube_long_range_links_are_consistent()
{
	let cv = create_config(ConfigBuilder{
		routers: 27,
		topology: cube3d(3),
		traffic: literal("transpose"),
		budget: 6.0,
		selection: literal("best_effort"),
		extra: vec![],
	});
	let config = Config::new(&cv);
	let endpoints = create_endpoints(27,0,0);
	let mut rng = StdRng::seed_from_u64(1);
	let network = build_network(&config,&endpoints,&mut rng).expect("no network built");

	// partners pair up symmetrically and spend within the budget
	let mut spent = 0.0;
	let mut paired = 0;
	for router in network.routers.iter()
	{
		if let Some(partner) = router.express_partner
		{
			assert_eq!(network.routers[partner].express_partner,Some(router.index));
			paired += 1;
			if router.index < partner
			{
				let a = (router.index%3) as f64 - (partner%3) as f64;
				let b = (router.index/3%3) as f64 - (partner/3%3) as f64;
				let c = (router.index/9) as f64 - (partner/9) as f64;
				spent += (a*a+b*b+c*c).sqrt();
			}
		}
	}
	assert!(paired>0,"a budget of 6 must fit some long-range link");
	assert!(spent<=6.0);

	let express:Vec<_> = network.internal_links.iter().filter(|l|l.weight==4).collect();
	assert_eq!(express.len(),paired);
	for pair in express.chunks(2)
	{
		let (forward,backward) = (pair[0],pair[1]);
		assert_eq!(forward.source,backward.destination);
		assert_eq!(forward.destination,backward.source);
		assert_eq!(forward.source_outport,backward.destination_inport);
		assert_eq!(forward.destination_inport,backward.source_outport);
		// three words in a three-dimensional label, both classes in range
		for link in pair
		{
			assert_eq!(link.source_outport.matches(|c:char|c.is_uppercase()).count(),3);
			assert!(link.vc_classes[0]>=1 && link.vc_classes[1]<=8 && link.vc_classes[0]!=link.vc_classes[1]);
		}
	}
}

#[test]
fn random_selection_is_reproducible()
{
	let endpoints = create_endpoints(27,0,0);
	let builder = ||create_config(ConfigBuilder{
		routers: 27,
		topology: cube3d(3),
		traffic: literal("uniform_random"),
		budget: 50.0,
		selection: literal("random"),
		extra: vec![],
	});
	let config = Config::new(&builder());
	let mut rng = StdRng::seed_from_u64(9);
	let first = build_network(&config,&endpoints,&mut rng).expect("no network built");
	let config = Config::new(&builder());
	let mut rng = StdRng::seed_from_u64(9);
	let second = build_network(&config,&endpoints,&mut rng).expect("no network built");

	let partners = |network:&atajos_lib::topology::Network|->Vec<Option<usize>>{
		network.routers.iter().map(|r|r.express_partner).collect()
	};
	assert_eq!(partners(&first),partners(&second));
	// ten draws commit at most ten pairs
	assert!(first.internal_links.iter().filter(|l|l.weight==4).count() <= 20);
}

#[test]
fn hotspot_cube_builds()
{
	let cv = create_config(ConfigBuilder{
		routers: 8,
		topology: cube3d(2),
		traffic: literal("hotspot"),
		budget: 4.0,
		selection: literal("best_effort"),
		extra: vec![
			("hotspots".to_string(),atajos_lib::config::ConfigurationValue::Array(vec![number(0.0)])),
			("hotspot_factor".to_string(),number(100.0)),
		],
	});
	let config = Config::new(&cv);
	let endpoints = create_endpoints(8,0,0);
	let mut rng = StdRng::seed_from_u64(1);
	let network = build_network(&config,&endpoints,&mut rng).expect("no network built");
	assert_eq!(network.routers.len(),8);
	// whatever got committed stayed a matching
	for router in network.routers.iter()
	{
		if let Some(partner) = router.express_partner
		{
			assert_eq!(network.routers[partner].express_partner,Some(router.index));
		}
	}
}

#[test]
fn ring_wraps_around()
{
	let cv = create_config(ConfigBuilder{
		routers: 5,
		topology: ring(),
		traffic: literal("uniform_random"),
		budget: 100.0,
		selection: literal("best_effort"),
		extra: vec![],
	});
	let config = Config::new(&cv);
	let endpoints = create_endpoints(5,0,0);
	let mut rng = StdRng::seed_from_u64(1);
	let network = build_network(&config,&endpoints,&mut rng).expect("no network built");

	// the ring ignores the budget: no long-range links, only the cycle itself
	assert!(network.routers.iter().all(|r|r.express_partner.is_none()));
	assert_eq!(network.internal_links.len(),10);
	assert!(network.internal_links.iter().all(|l|l.weight==1));
	let wrap = network.internal_links.iter()
		.find(|l|l.source==4 && l.destination==0)
		.expect("no wrap-around link");
	assert_eq!(wrap.source_outport,"East");
	assert_eq!(wrap.vc_classes,[1,2]);
	let back = network.internal_links.iter()
		.find(|l|l.source==0 && l.destination==4)
		.expect("no reverse wrap-around link");
	assert_eq!(back.source_outport,"West");
	assert_eq!(back.vc_classes,[7,8]);
}
