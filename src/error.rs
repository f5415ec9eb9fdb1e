/*!

This module manages the errors of the topology construction. All failures here are deterministic
precondition violations surfaced synchronously to the caller; there is nothing to retry and no
partial state to roll back, since matchings and link lists are only published on success.

Instead of `expect` or `unwrap_or_else` try
* `map_err` like in `.map_err(|e|Error::could_not_open_file(source_location!(),path.to_path_buf(),e))?;`
* `ok_or_else` like in `.ok_or_else( ||Error::new(source_location!(),ErrorKind::EmptyTrafficMatrix) )?;`

Cases that should never happen are kept as `panic!`.

*/

use std::fmt::{Display,Formatter};
use std::path::PathBuf;

use crate::config::ConfigurationValue;

/// The main Error type to be used in each `Result<Whatever,Error>`.
/// It contains the code source of the error and its kind.
/// An arbitrary `String` message can be optionally attached.
#[derive(Debug)]
pub struct Error
{
	pub source_location: SourceLocation,
	pub kind: ErrorKind,
	pub message: Option<String>,
}

/// A source code location where an error occurred.
/// Contains the values of the macros `std::{file,line,column}`.
#[derive(Debug)]
pub struct SourceLocation
{
	pub file: &'static str,
	pub line: u32,
	pub column: u32,
}

#[derive(Debug)]
pub enum ErrorKind
{
	/// A ConfigurationValue of an unexpected shape. Keep the offending value.
	IllFormedConfiguration{
		value: ConfigurationValue,
	},
	/// A synthetic traffic pattern name that is not any of the supported ones.
	UnknownTrafficPattern{
		name: String,
	},
	/// The sides of the requested shape do not multiply into the router count.
	ShapeMismatch{
		sides: Vec<usize>,
		router_count: usize,
	},
	/// A traffic matrix whose entries total zero cannot be normalized.
	EmptyTrafficMatrix,
	/// A file could not be read. Keep the path and the original error.
	CouldNotOpenFile{
		filepath: PathBuf,
		io_error: std::io::Error,
	},
	/// A traffic matrix file whose content does not make a square matrix of the network size.
	MalformedTrafficFile{
		filepath: PathBuf,
		line: usize,
	},
	/// A trailing endpoint without the DMA type tag. Only DMA endpoints may be in the remainder
	/// attached to router 0.
	MisplacedEndpoint{
		endpoint_index: usize,
	},
}

// source_location!()
#[macro_export]
macro_rules! source_location{
	() => {
		$crate::error::SourceLocation{
			file: file!(),
			line: line!(),
			column: column!(),
		}
	}
}

// error!(kind_constructor, args...)
#[macro_export]
macro_rules! error{
	($kind:ident) => {
		$crate::error::Error::$kind($crate::source_location!())
	};
	($kind:ident, $($args:expr),* $(,)?) => {
		$crate::error::Error::$kind($crate::source_location!(), $($args),*)
	};
}

use ErrorKind::*;

impl Error
{
	pub fn new(source_location:SourceLocation, kind:ErrorKind) -> Error
	{
		Error{
			source_location,
			kind,
			message: None,
		}
	}
	pub fn with_message(mut self, message:String) -> Error
	{
		self.message = Some(message);
		self
	}
	/// example call: Error::ill_formed_configuration(source_location!(),value.clone()).
	pub fn ill_formed_configuration(source_location:SourceLocation, value:ConfigurationValue) -> Error
	{
		Error::new(source_location,IllFormedConfiguration{value})
	}
	pub fn unknown_traffic_pattern(source_location:SourceLocation, name:String) -> Error
	{
		Error::new(source_location,UnknownTrafficPattern{name})
	}
	pub fn shape_mismatch(source_location:SourceLocation, sides:Vec<usize>, router_count:usize) -> Error
	{
		Error::new(source_location,ShapeMismatch{sides,router_count})
	}
	pub fn empty_traffic_matrix(source_location:SourceLocation) -> Error
	{
		Error::new(source_location,EmptyTrafficMatrix)
	}
	pub fn could_not_open_file(source_location:SourceLocation, filepath:PathBuf, io_error:std::io::Error) -> Error
	{
		Error::new(source_location,CouldNotOpenFile{filepath,io_error})
	}
	pub fn malformed_traffic_file(source_location:SourceLocation, filepath:PathBuf, line:usize) -> Error
	{
		Error::new(source_location,MalformedTrafficFile{filepath,line})
	}
	pub fn misplaced_endpoint(source_location:SourceLocation, endpoint_index:usize) -> Error
	{
		Error::new(source_location,MisplacedEndpoint{endpoint_index})
	}
}

impl Display for Error
{
	fn fmt(&self, formatter:&mut Formatter<'_>) -> std::result::Result<(),std::fmt::Error>
	{
		let Error{source_location:location,kind,message} = self;
		writeln!(formatter,"Error at file {} at line {} column {}.",location.file,location.line,location.column)?;
		if let Some(text) = message
		{
			writeln!(formatter,"{}",text)?;
		}
		kind.fmt(formatter)?;
		Ok(())
	}
}

impl Display for ErrorKind
{
	fn fmt(&self, formatter:&mut Formatter<'_>) -> std::result::Result<(),std::fmt::Error>
	{
		match self
		{
			IllFormedConfiguration{value} =>
			{
				writeln!(formatter,"IllFormedConfiguration error: the configuration value {} does not have the expected shape.",value)?;
			},
			UnknownTrafficPattern{name} =>
			{
				writeln!(formatter,"UnknownTrafficPattern error: the synthetic traffic pattern `{}` is not supported.",name)?;
			},
			ShapeMismatch{sides,router_count} =>
			{
				writeln!(formatter,"ShapeMismatch error: the sides {:?} do not multiply into the {} routers of the network.",sides,router_count)?;
			},
			EmptyTrafficMatrix =>
			{
				writeln!(formatter,"EmptyTrafficMatrix error: the traffic matrix sums to zero and cannot be normalized.")?;
			},
			CouldNotOpenFile{filepath,io_error} =>
			{
				writeln!(formatter,"CouldNotOpenFile error: The file {:?} could not be opened.\nio_error: {}",filepath,io_error)?;
			},
			MalformedTrafficFile{filepath,line} =>
			{
				writeln!(formatter,"MalformedTrafficFile error: The file {:?} is not a square traffic matrix of the network size (line {}).",filepath,line)?;
			},
			MisplacedEndpoint{endpoint_index} =>
			{
				writeln!(formatter,"MisplacedEndpoint error: the trailing endpoint {} is not of the DMA kind.",endpoint_index)?;
			},
		}
		Ok(())
	}
}
