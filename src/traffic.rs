/*!

Traffic-demand matrices.

The long-range link selection is driven by an N×N matrix of expected demand between router pairs.
It is either synthesized from one of the classical patterns or loaded from a plain-text file.

The synthetic path normalizes the matrix so its entries total 1; the file path uses the loaded
values as-is. Do not unify the two paths without settling the intended semantics of file-given
matrices.

*/

use std::path::{Path,PathBuf};

use quantifiable_derive::Quantifiable;//the derive macro
use crate::matrix::Matrix;
use crate::topology::cartesian::CartesianData;
use crate::error::Error;
use crate::error;

/// The supported synthetic demand patterns. Destinations are computed over the coordinates
/// `(x,y[,z])` of the router block, `x = id % columns`.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum TrafficPattern
{
	///Every router demands every other router equally.
	UniformRandom,
	///`(x,y) -> (y,x)`; in three dimensions the x and y axes swap and z is kept.
	Transpose,
	///The row coordinate shifts by half the rows, columns fixed.
	Tornado,
	///Every coordinate complements against its own side: `c -> side-1-c`.
	BitComplement,
	///Every coordinate XORs with `side-1`.
	BitReverse,
	///On the linear id, `i -> i/2 + (i%2)*(N/2)`.
	BitRotation,
	///The row coordinate shifts by one, columns fixed.
	Neighbor,
	///The perfect shuffle on the linear id: `i -> 2i` wrapped as `2i-N+1` past the end.
	Shuffle,
	///Uniform background demand plus extra demand towards the configured hotspot routers.
	Hotspot,
}

impl TrafficPattern
{
	pub fn from_name(name:&str) -> Result<TrafficPattern,Error>
	{
		match name
		{
			"uniform_random" => Ok(TrafficPattern::UniformRandom),
			"transpose" => Ok(TrafficPattern::Transpose),
			"tornado" => Ok(TrafficPattern::Tornado),
			"bit_complement" => Ok(TrafficPattern::BitComplement),
			"bit_reverse" => Ok(TrafficPattern::BitReverse),
			"bit_rotation" => Ok(TrafficPattern::BitRotation),
			"neighbor" => Ok(TrafficPattern::Neighbor),
			"shuffle" => Ok(TrafficPattern::Shuffle),
			"hotspot" => Ok(TrafficPattern::Hotspot),
			_ => Err(error!(unknown_traffic_pattern, name.to_string())),
		}
	}
}

/// Where the demand matrix comes from.
#[derive(Clone,Debug)]
pub enum TrafficSource
{
	///A synthetic pattern, by its configuration name. Resolved when the matrix is built.
	Synthetic(String),
	///A plain-text file with one row of whitespace-separated floats per line.
	File(PathBuf),
}

/// Demand adjustments applied after the pattern, before normalization.
#[derive(Clone,Debug,Default)]
pub struct TrafficOptions
{
	///Replace the whole matrix by demand towards this single router.
	pub single_dest: Option<usize>,
	///Zero the demand of every router but this one.
	pub single_sender: Option<usize>,
	///Routers receiving extra demand under the `hotspot` pattern.
	pub hotspots: Vec<usize>,
	///Extra demand per hotspot, in percent of the uniform background.
	pub hotspot_factor: f64,
}

/// An N×N matrix of non-negative demand between router pairs. Built once per construction call
/// and immutable thereafter.
#[derive(Debug,Quantifiable)]
pub struct TrafficMatrix
{
	demand: Matrix<f64>,
}

impl TrafficMatrix
{
	fn new(demand:Matrix<f64>) -> TrafficMatrix
	{
		TrafficMatrix{demand}
	}
	pub fn router_count(&self) -> usize
	{
		self.demand.get_rows()
	}
	/// The demand from `source` to `destination`.
	pub fn amount(&self, source:usize, destination:usize) -> f64
	{
		*self.demand.get(source,destination)
	}
	/// The grand total of the matrix. 1 for synthetic matrices.
	pub fn total(&self) -> f64
	{
		self.demand.iter().sum()
	}
}

///The destination of `origin` under a permutation pattern.
fn pattern_destination(pattern:TrafficPattern, space:&CartesianData, origin:usize) -> usize
{
	let n = space.size;
	match pattern
	{
		TrafficPattern::Transpose =>
		{
			let mut coordinates = space.unpack(origin);
			coordinates.swap(0,1);
			space.pack(&coordinates)
		},
		TrafficPattern::Tornado =>
		{
			let mut coordinates = space.unpack(origin);
			let rows = space.sides[1];
			coordinates[1] = (coordinates[1] + rows/2) % rows;
			space.pack(&coordinates)
		},
		TrafficPattern::BitComplement =>
		{
			let coordinates = space.unpack(origin);
			let complemented:Vec<usize> = coordinates.iter().zip(space.sides.iter()).map(|(c,side)|side-1-c).collect();
			space.pack(&complemented)
		},
		TrafficPattern::BitReverse =>
		{
			let coordinates = space.unpack(origin);
			let reversed:Vec<usize> = coordinates.iter().zip(space.sides.iter()).map(|(c,side)|c ^ (side-1)).collect();
			space.pack(&reversed)
		},
		TrafficPattern::BitRotation => origin/2 + (origin%2)*(n/2),
		TrafficPattern::Neighbor =>
		{
			let mut coordinates = space.unpack(origin);
			let rows = space.sides[1];
			coordinates[1] = (coordinates[1] + 1) % rows;
			space.pack(&coordinates)
		},
		TrafficPattern::Shuffle => if origin*2 < n { origin*2 } else { origin*2 - n + 1 },
		TrafficPattern::UniformRandom | TrafficPattern::Hotspot => panic!("{:?} is not a permutation pattern",pattern),
	}
}

/// Build the demand matrix of a synthetic pattern over the router block, apply the overrides and
/// normalize to total 1. A matrix totalling zero is refused instead of dividing by zero.
pub fn build_synthetic(pattern:TrafficPattern, space:&CartesianData, options:&TrafficOptions) -> Result<TrafficMatrix,Error>
{
	let n = space.size;
	let mut demand = Matrix::constant(0f64,n,n);
	match pattern
	{
		TrafficPattern::UniformRandom =>
		{
			for i in 0..n
			{
				for j in 0..n
				{
					if i!=j
					{
						*demand.get_mut(i,j) = 1.0;
					}
				}
			}
		},
		TrafficPattern::Hotspot =>
		{
			//Uniform background, self-demand included.
			for i in 0..n
			{
				for j in 0..n
				{
					*demand.get_mut(i,j) = 1.0;
				}
			}
			for &hotspot in options.hotspots.iter()
			{
				assert!(hotspot<n,"hotspot router {} outside the network of {} routers",hotspot,n);
				for row in 0..n
				{
					*demand.get_mut(row,hotspot) += options.hotspot_factor/100.0;
				}
			}
		},
		_ =>
		{
			for origin in 0..n
			{
				let destination = pattern_destination(pattern,space,origin);
				*demand.get_mut(origin,destination) = 1.0;
			}
		},
	}
	if let Some(destination) = options.single_dest
	{
		assert!(destination<n,"single destination {} outside the network of {} routers",destination,n);
		demand = Matrix::constant(0f64,n,n);
		for row in 0..n
		{
			*demand.get_mut(row,destination) = 1.0;
		}
	}
	if let Some(sender) = options.single_sender
	{
		assert!(sender<n,"single sender {} outside the network of {} routers",sender,n);
		for row in 0..n
		{
			if row!=sender
			{
				for column in 0..n
				{
					*demand.get_mut(row,column) = 0.0;
				}
			}
		}
	}
	let total:f64 = demand.iter().sum();
	if total==0.0
	{
		return Err(error!(empty_traffic_matrix).with_message(format!("pattern {:?} over {:?} left no demand to normalize",pattern,space.sides)));
	}
	Ok(TrafficMatrix::new(demand.map(|v|v/total)))
}

/// Load a demand matrix from a plain-text file: one row of exactly `router_count` whitespace-
/// separated floats per non-empty line, exactly `router_count` such lines. Values are used
/// without renormalization.
pub fn load_traffic_file(filepath:&Path, router_count:usize) -> Result<TrafficMatrix,Error>
{
	let content = std::fs::read_to_string(filepath).map_err(|e|error!(could_not_open_file, filepath.to_path_buf(), e))?;
	let mut demand = Matrix::constant(0f64,router_count,router_count);
	let mut row = 0;
	for (line_index,line) in content.lines().enumerate()
	{
		if line.trim().is_empty()
		{
			continue;
		}
		if row>=router_count
		{
			return Err(error!(malformed_traffic_file, filepath.to_path_buf(), line_index+1)
				.with_message(format!("more than {} non-empty lines",router_count)));
		}
		let mut column = 0;
		for token in line.split_whitespace()
		{
			if column>=router_count
			{
				return Err(error!(malformed_traffic_file, filepath.to_path_buf(), line_index+1)
					.with_message(format!("more than {} values in a row",router_count)));
			}
			let value:f64 = token.parse().map_err(|_|error!(malformed_traffic_file, filepath.to_path_buf(), line_index+1)
				.with_message(format!("`{}` is not a float",token)))?;
			*demand.get_mut(row,column) = value;
			column += 1;
		}
		if column!=router_count
		{
			return Err(error!(malformed_traffic_file, filepath.to_path_buf(), line_index+1)
				.with_message(format!("row of {} values in a {}-router network",column,router_count)));
		}
		row += 1;
	}
	if row!=router_count
	{
		return Err(error!(malformed_traffic_file, filepath.to_path_buf(), row)
			.with_message(format!("{} rows in a {}-router network",row,router_count)));
	}
	Ok(TrafficMatrix::new(demand))
}

#[cfg(test)]
mod tests
{
	use super::*;
	use std::io::Write;

	fn mesh4() -> CartesianData
	{
		CartesianData::new(&[4,4])
	}

	#[test]
	fn every_pattern_normalizes()
	{
		let space = mesh4();
		let options = TrafficOptions::default();
		let patterns = [
			TrafficPattern::UniformRandom,
			TrafficPattern::Transpose,
			TrafficPattern::Tornado,
			TrafficPattern::BitComplement,
			TrafficPattern::BitReverse,
			TrafficPattern::BitRotation,
			TrafficPattern::Neighbor,
			TrafficPattern::Shuffle,
			TrafficPattern::Hotspot,
		];
		for &pattern in patterns.iter()
		{
			let traffic = build_synthetic(pattern,&space,&options).expect("no traffic built");
			assert!( (traffic.total()-1.0).abs() < 1e-9, "pattern {:?} totals {}",pattern,traffic.total());
		}
		let cube = CartesianData::new(&[2,2,2]);
		for &pattern in patterns.iter()
		{
			let traffic = build_synthetic(pattern,&cube,&options).expect("no traffic built");
			assert!( (traffic.total()-1.0).abs() < 1e-9, "pattern {:?} totals {} on the cube",pattern,traffic.total());
		}
	}
	#[test]
	fn permutation_destinations()
	{
		let space = mesh4();
		// (1,0) -> (0,1)
		assert_eq!(pattern_destination(TrafficPattern::Transpose,&space,1),4);
		// (1,2) -> (1,0)
		assert_eq!(pattern_destination(TrafficPattern::Tornado,&space,9),1);
		// (1,0) -> (2,3)
		assert_eq!(pattern_destination(TrafficPattern::BitComplement,&space,1),14);
		// (1,2) -> (2,1)
		assert_eq!(pattern_destination(TrafficPattern::BitReverse,&space,9),6);
		assert_eq!(pattern_destination(TrafficPattern::BitRotation,&space,5),10);
		assert_eq!(pattern_destination(TrafficPattern::BitRotation,&space,6),3);
		// (1,3) -> (1,0)
		assert_eq!(pattern_destination(TrafficPattern::Neighbor,&space,13),1);
		assert_eq!(pattern_destination(TrafficPattern::Shuffle,&space,5),10);
		assert_eq!(pattern_destination(TrafficPattern::Shuffle,&space,9),3);
	}
	#[test]
	fn hotspot_adds_column_demand()
	{
		let space = mesh4();
		let options = TrafficOptions{
			hotspots: vec![3],
			hotspot_factor: 50.0,
			..TrafficOptions::default()
		};
		let traffic = build_synthetic(TrafficPattern::Hotspot,&space,&options).expect("no traffic built");
		// 16*16 background entries of 1 plus 16 hotspot additions of 0.5
		let total_raw = 256.0 + 16.0*0.5;
		assert!( (traffic.amount(5,3) - 1.5/total_raw).abs() < 1e-12 );
		assert!( (traffic.amount(5,2) - 1.0/total_raw).abs() < 1e-12 );
	}
	#[test]
	fn overrides_precedence()
	{
		let space = mesh4();
		let options = TrafficOptions{
			single_dest: Some(7),
			single_sender: Some(2),
			..TrafficOptions::default()
		};
		let traffic = build_synthetic(TrafficPattern::Tornado,&space,&options).expect("no traffic built");
		// only the (2,7) entry survives both overrides
		assert_eq!(traffic.amount(2,7),1.0);
		assert_eq!(traffic.amount(3,7),0.0);
		assert_eq!(traffic.amount(2,6),0.0);
	}
	#[test]
	fn empty_matrix_is_refused()
	{
		let space = CartesianData::new(&[1,1]);
		// a single router has nobody else to demand from
		let r = build_synthetic(TrafficPattern::UniformRandom,&space,&TrafficOptions::default());
		assert!(r.is_err());
	}
	#[test]
	fn unknown_pattern_name()
	{
		assert!(TrafficPattern::from_name("transpose").is_ok());
		assert!(TrafficPattern::from_name("made_up").is_err());
	}
	#[test]
	fn file_loading()
	{
		let dir = std::env::temp_dir();
		let path = dir.join("atajos_traffic_ok.txt");
		{
			let mut file = std::fs::File::create(&path).expect("could not create the test file");
			writeln!(file,"0.0 2.0").expect("write failed");
			writeln!(file).expect("write failed");
			writeln!(file,"1.5 0.0").expect("write failed");
		}
		let traffic = load_traffic_file(&path,2).expect("no traffic loaded");
		// loaded values are kept unnormalized
		assert_eq!(traffic.amount(0,1),2.0);
		assert_eq!(traffic.amount(1,0),1.5);
		assert_eq!(traffic.total(),3.5);

		let bad_path = dir.join("atajos_traffic_bad.txt");
		{
			let mut file = std::fs::File::create(&bad_path).expect("could not create the test file");
			writeln!(file,"0.0 2.0 9.0").expect("write failed");
			writeln!(file,"1.5 0.0").expect("write failed");
		}
		assert!(load_traffic_file(&bad_path,2).is_err());
		assert!(load_traffic_file(&dir.join("atajos_traffic_missing.txt"),2).is_err());
	}
}
