/*!

Direction labels and virtual-channel turn classes for links.

Every link direction is reduced to the per-axis sign of its coordinate delta. Unit grid hops get
the compass/vertical words `East`/`West`/`North`/`South`/`Up`/`Down`; long-range links concatenate
one word per axis, most significant axis first, with `Same` on axes without movement.

Each direction is further granted exactly two of the eight virtual-channel turn classes, through a
fixed partition of the 26 non-null sign patterns. Restricting every direction to its two classes
leaves no cyclic dependency among classes, so adaptive routing over base and long-range links
together stays deadlock-free.

*/

use crate::topology::cartesian::CartesianData;

/// The size of the virtual-channel class space links are classified into.
pub const NUM_TURN_CLASSES: usize = 8;

/// Per-axis movement sign of a link.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Sign
{
	Positive,
	Negative,
	Zero,
}

impl Sign
{
	pub fn opposite(self) -> Sign
	{
		match self
		{
			Sign::Positive => Sign::Negative,
			Sign::Negative => Sign::Positive,
			Sign::Zero => Sign::Zero,
		}
	}
}

use Sign::{Positive as P, Negative as M, Zero as Z};

/// The partition of sign patterns (in x,y,z axis order) into the eight turn classes.
/// A pattern belongs to exactly two classes; a packet on the link may use either.
/// Classes 1 to 4 order the axis turns one way and classes 5 to 8 the other, so that unit
/// directions resolve to `+x:{1,2}`, `-x:{7,8}`, `+y:{7,8}`, `-y:{4,5}`, `+z:{7,8}`, `-z:{3,6}`.
const TURN_CLASS_MEMBERS: [&[[Sign;3]]; NUM_TURN_CLASSES] = [
	&[[P,P,M],[P,P,Z],[P,P,P],[P,Z,M],[P,Z,Z],[P,Z,P]],
	&[[P,M,P],[P,Z,P],[P,P,P],[P,M,Z],[P,Z,Z],[P,P,Z]],
	&[[P,M,M],[P,M,Z],[P,M,P],[Z,Z,M]],
	&[[P,M,M],[P,Z,M],[P,P,M],[Z,M,Z]],
	&[[M,M,M],[M,M,Z],[M,M,P],[Z,M,M],[Z,M,Z],[Z,M,P]],
	&[[M,M,M],[M,Z,M],[M,P,M],[Z,M,M],[Z,Z,M],[Z,P,M]],
	&[[M,P,M],[M,P,Z],[M,P,P],[Z,P,M],[Z,P,Z],[Z,P,P],[M,Z,M],[M,Z,Z],[M,Z,P],[Z,Z,P]],
	&[[M,M,P],[M,Z,P],[M,P,P],[Z,M,P],[Z,Z,P],[Z,P,P],[M,M,Z],[M,Z,Z],[M,P,Z],[Z,P,Z]],
];

/// The word for moving along `axis` towards greater (`positive`) or lower coordinates.
pub fn direction_word(axis:usize, positive:bool) -> &'static str
{
	match (axis,positive)
	{
		(0,true) => "East",
		(0,false) => "West",
		(1,true) => "North",
		(1,false) => "South",
		(2,true) => "Up",
		(2,false) => "Down",
		_ => panic!("There is no direction word for axis {}",axis),
	}
}

/// The per-axis movement signs of a link, x first. Two-dimensional deltas keep `Zero` as their
/// z entry.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct SignPattern
{
	signs: [Sign;3],
}

impl SignPattern
{
	/// Classify the movement from `origin` to `destination`.
	pub fn between(space:&CartesianData, origin:usize, destination:usize) -> SignPattern
	{
		let origin_coordinates = space.unpack(origin);
		let destination_coordinates = space.unpack(destination);
		let mut signs = [Z;3];
		for (axis,(o,d)) in origin_coordinates.iter().zip(destination_coordinates.iter()).enumerate()
		{
			signs[axis] = if o<d { P } else if o>d { M } else { Z };
		}
		SignPattern{signs}
	}
	/// The pattern of a unit hop along `axis`.
	pub fn unit(axis:usize, positive:bool) -> SignPattern
	{
		let mut signs = [Z;3];
		signs[axis] = if positive { P } else { M };
		SignPattern{signs}
	}
	/// The pattern of the same wire traversed backwards.
	pub fn reversed(&self) -> SignPattern
	{
		let mut signs = [Z;3];
		for (axis,sign) in self.signs.iter().enumerate()
		{
			signs[axis] = sign.opposite();
		}
		SignPattern{signs}
	}
	pub fn is_null(&self) -> bool
	{
		self.signs.iter().all(|s|*s==Z)
	}
	/// The two turn classes a link with this movement may use. The forward and backward
	/// directions of a wire are looked up independently.
	pub fn turn_classes(&self) -> [usize;2]
	{
		let mut found = [0;2];
		let mut count = 0;
		for (class_index,members) in TURN_CLASS_MEMBERS.iter().enumerate()
		{
			if members.iter().any(|m|*m==self.signs)
			{
				assert!(count<2,"sign pattern {:?} lies in more than two turn classes",self.signs);
				found[count] = class_index+1;
				count += 1;
			}
		}
		assert!(count==2,"sign pattern {:?} must lie in exactly two turn classes",self.signs);
		found
	}
	/// The outport/inport label of a link with this movement, most significant axis first:
	/// `NorthWest` in two dimensions, `UpSameEast` in three.
	pub fn label(&self, dimensions:usize) -> String
	{
		let mut label = String::new();
		for axis in (0..dimensions).rev()
		{
			label.push_str(match self.signs[axis]
			{
				P => direction_word(axis,true),
				M => direction_word(axis,false),
				Z => "Same",
			});
		}
		label
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	#[test]
	fn every_movement_has_two_classes()
	{
		let signs = [P,M,Z];
		for &x in signs.iter()
		{
			for &y in signs.iter()
			{
				for &z in signs.iter()
				{
					let pattern = SignPattern{signs:[x,y,z]};
					if pattern.is_null()
					{
						continue;
					}
					let classes = pattern.turn_classes();
					assert!(classes[0]>=1 && classes[1]<=NUM_TURN_CLASSES && classes[0]<classes[1],
						"bad classes {:?} for {:?}",classes,pattern);
				}
			}
		}
	}
	#[test]
	fn unit_directions()
	{
		assert_eq!(SignPattern::unit(0,true).turn_classes(),[1,2]);
		assert_eq!(SignPattern::unit(0,false).turn_classes(),[7,8]);
		assert_eq!(SignPattern::unit(1,true).turn_classes(),[7,8]);
		assert_eq!(SignPattern::unit(1,false).turn_classes(),[4,5]);
		assert_eq!(SignPattern::unit(2,true).turn_classes(),[7,8]);
		assert_eq!(SignPattern::unit(2,false).turn_classes(),[3,6]);
		assert_eq!(SignPattern::unit(1,true).label(2),"NorthSame");
		assert_eq!(direction_word(1,true),"North");
	}
	#[test]
	fn reversal_is_opposite_per_axis()
	{
		let space = CartesianData::new(&[4,4]);
		// router 1 is at (1,0) and router 4 at (0,1)
		let forward = SignPattern::between(&space,1,4);
		let backward = SignPattern::between(&space,4,1);
		assert_eq!(forward.reversed(),backward);
		assert_eq!(forward.label(2),"NorthWest");
		assert_eq!(backward.label(2),"SouthEast");
		assert_eq!(forward.turn_classes(),[7,8]);
		assert_eq!(backward.turn_classes(),[2,3]);
	}
	#[test]
	fn three_dimensional_labels()
	{
		let space = CartesianData::new(&[3,3,3]);
		// router 1 is at (1,0,0) and router 21 at (0,1,2)
		let forward = SignPattern::between(&space,1,21);
		assert_eq!(forward.label(3),"UpNorthWest");
		assert_eq!(forward.reversed().label(3),"DownSouthEast");
		let same_axis = SignPattern::between(&space,0,9);
		assert_eq!(same_axis.label(3),"UpSameSame");
	}
}
