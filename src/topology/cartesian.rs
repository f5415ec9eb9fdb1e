
use quantifiable_derive::Quantifiable;//the derive macro

/// A Cartesian orthahedral block of routers of arbitrary dimension. Router indices decode
/// row-major into coordinates, the first axis fastest: `x = id % sides[0]`.
#[derive(Debug,Quantifiable)]
pub struct CartesianData
{
	pub sides: Vec<usize>,
	pub size: usize,
}

impl CartesianData
{
	pub fn new(sides:&[usize]) -> CartesianData
	{
		CartesianData{
			sides: sides.to_vec(),
			size: sides.iter().product(),
		}
	}
	pub fn unpack(&self, mut router_index:usize) -> Vec<usize>
	{
		if router_index>=self.size
		{
			panic!("router_index={} is greater than the size of the block={}",router_index,self.size);
		}
		let mut coordinates = Vec::with_capacity(self.sides.len());
		for side in self.sides.iter()
		{
			coordinates.push(router_index%side);
			router_index/=side;
		}
		coordinates
	}
	pub fn pack(&self, coordinates:&[usize]) -> usize
	{
		let mut router_index = 0;
		let mut stride = 1;
		for (i,side) in self.sides.iter().enumerate()
		{
			if coordinates[i]>=*side
			{
				panic!("coordinate {} is greater than the side {}",coordinates[i],side);
			}
			router_index += coordinates[i]*stride;
			stride *= side;
		}
		router_index
	}
	/// Sum of the per-axis coordinate differences.
	pub fn manhattan_distance(&self, origin:usize, destination:usize) -> usize
	{
		let origin_coordinates = self.unpack(origin);
		let destination_coordinates = self.unpack(destination);
		origin_coordinates.iter().zip(destination_coordinates.iter()).map(|(o,d)|{
			if o>d { o-d } else { d-o }
		}).sum()
	}
	/// The physical length of a straight wire between the two routers.
	pub fn euclidean_distance(&self, origin:usize, destination:usize) -> f64
	{
		let origin_coordinates = self.unpack(origin);
		let destination_coordinates = self.unpack(destination);
		origin_coordinates.iter().zip(destination_coordinates.iter()).map(|(o,d)|{
			let delta = *o as f64 - *d as f64;
			delta*delta
		}).sum::<f64>().sqrt()
	}
}
