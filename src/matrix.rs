
use std::mem::size_of;
use crate::quantify::Quantifiable;

/// A dense matrix in row-major storage. Used for the traffic-demand matrices driving the
/// long-range link selection.
#[derive(Clone,Debug)]
pub struct Matrix<T>
{
	data: Vec<T>,
	num_columns: usize,
}

impl<T> Matrix<T>
{
	/// Build a matrix with every entry set to `value`.
	pub fn constant(value:T, num_rows:usize, num_columns:usize) -> Matrix<T> where T:Clone
	{
		Matrix{
			data: vec![value;num_rows*num_columns],
			num_columns,
		}
	}
	/// Read a matrix entry.
	pub fn get(&self, row:usize, column:usize) -> &T
	{
		debug_assert!(column<self.num_columns);
		&self.data[row*self.num_columns+column]
	}
	/// Read/write a matrix entry.
	pub fn get_mut(&mut self, row:usize, column:usize) -> &mut T
	{
		debug_assert!(column<self.num_columns);
		&mut self.data[row*self.num_columns+column]
	}
	pub fn get_rows(&self) -> usize
	{
		self.data.len()/self.num_columns
	}
	pub fn get_columns(&self) -> usize
	{
		self.num_columns
	}
	/// Build a new matrix of the same shape by applying `f` to every entry.
	pub fn map<U,F:FnMut(&T)->U>(&self, f:F) -> Matrix<U>
	{
		Matrix{
			data: self.data.iter().map(f).collect(),
			num_columns: self.num_columns,
		}
	}
	/// Iterate over all entries in row-major order.
	pub fn iter(&self) -> std::slice::Iter<T>
	{
		self.data.iter()
	}
}

impl<T:Quantifiable> Quantifiable for Matrix<T>
{
	fn total_memory(&self) -> usize
	{
		size_of::<Matrix<T>>() + self.data.total_memory()
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		unimplemented!();
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	#[test]
	fn shape_and_entries()
	{
		let mut m = Matrix::constant(0usize,3,2);
		assert_eq!(m.get_rows(),3);
		assert_eq!(m.get_columns(),2);
		*m.get_mut(2,1) = 7;
		assert_eq!(*m.get(2,1),7);
		assert_eq!(*m.get(0,0),0);
		let doubled = m.map(|v|v*2);
		assert_eq!(*doubled.get(2,1),14);
		assert_eq!(m.iter().sum::<usize>(),7);
	}
}
