/*!

Configuration objects for the topology constructor.

The host framework describes the requested topology with a tree of [ConfigurationValue], in the
same object syntax the simulator uses everywhere else. The builders in this crate consume such
trees through the [`match_object_panic!`](crate::match_object_panic) macro; malformed trees are
configuration mistakes and abort with a diagnostic.

*/

use std::fmt::{Display,Formatter};

use crate::error::Error;
use crate::error;

#[derive(Clone,Debug,PartialEq,PartialOrd)]
pub enum ConfigurationValue
{
	Literal(String),
	Number(f64),
	Object(String,Vec<(String,ConfigurationValue)>),
	Array(Vec<ConfigurationValue>),
	True,
	False,
	None,
}

impl Default for ConfigurationValue
{
	fn default() -> ConfigurationValue
	{
		ConfigurationValue::None
	}
}

impl ConfigurationValue
{
	fn write(&self, f:&mut Formatter, indent:usize) -> Result<(),std::fmt::Error>
	{
		let is=String::from("\t").repeat(indent);
		write!(f,"{}",is)?;
		match self
		{
			&ConfigurationValue::Literal(ref s) => write!(f,"\"{}\"",s)?,
			&ConfigurationValue::Number(v) => write!(f,"{}",v)?,
			&ConfigurationValue::Object(ref name, ref list) =>
			{
				writeln!(f,"{}\n{}{{",name,is)?;
				for &(ref attr_name,ref attr_value) in list.iter()
				{
					writeln!(f,"{}\t{}:",is,attr_name)?;
					attr_value.write(f,indent+1)?;
					writeln!(f,",")?;
				}
				writeln!(f,"{}}}",is)?;
			},
			&ConfigurationValue::Array(ref list) =>
			{
				writeln!(f,"[")?;
				for elem in list.iter()
				{
					elem.write(f,indent+1)?;
					writeln!(f,",")?;
				}
				writeln!(f,"{}]",is)?;
			},
			&ConfigurationValue::True => write!(f,"true")?,
			&ConfigurationValue::False => write!(f,"false")?,
			&ConfigurationValue::None => write!(f,"NONE VALUE")?,
		};
		Ok(())
	}
	pub fn as_bool(&self) -> Result<bool,Error>
	{
		match self
		{
			&ConfigurationValue::True => Ok(true),
			&ConfigurationValue::False => Ok(false),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_str(&self) -> Result<&str,Error>
	{
		match self
		{
			&ConfigurationValue::Literal(ref s) => Ok(s),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_f64(&self) -> Result<f64,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) => Ok(x),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_usize(&self) -> Result<usize,Error>
	{
		match self
		{
			// Casting rounds towards zero; configuration numbers for counts are expected integral.
			&ConfigurationValue::Number(x) if x>=0.0 => Ok(x as usize),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_array(&self) -> Result<&Vec<ConfigurationValue>,Error>
	{
		match self
		{
			&ConfigurationValue::Array(ref a) => Ok(a),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
}

impl Display for ConfigurationValue
{
	fn fmt(&self, f:&mut Formatter) -> Result<(),std::fmt::Error>
	{
		self.write(f,0)
	}
}

/// Process a `ConfigurationValue::Object(name,attributes)` with the given arms on the attribute
/// names, panicking on any unexpected shape.
#[macro_export]
macro_rules! match_object_panic{
	($cv:expr, $name:literal, $valueid:ident ) => {{
		match_object_panic!($cv,[$name],$valueid,)
	}};
	($cv:expr, $name:literal, $valueid:ident, $($arm:tt)* ) => {{
		match_object_panic!($cv,[$name],$valueid,$($arm)*)
	}};
	($cv:expr, $names:expr, $valueid:ident, $($arm:tt)* ) => {{
		if let &$crate::config::ConfigurationValue::Object(ref cv_name, ref cv_pairs) = $cv
		{
			if !$names.iter().any(|&x|x==cv_name)
			{
				if $names.len()==1 {
					panic!("A {} must be created from a `{}` object not `{}`",$names[0],$names[0],cv_name);
				} else {
					panic!("Trying to create either of `{:?}` object from `{}`",$names,cv_name);
				}
			}
			for &(ref name,ref $valueid) in cv_pairs
			{
				match AsRef::<str>::as_ref(&name)
				{
					$( $arm )*
					"legend_name" => (),
					_ => panic!("Nothing to do with field {} in {}",name,$names[0]),
				}
			}
		}
		else
		{
			panic!("Trying to create a {} from a non-Object",$names[0]);
		}
	}};
}

#[cfg(test)]
mod tests
{
	use super::*;
	#[test]
	fn accessors()
	{
		assert_eq!(ConfigurationValue::Number(5.0).as_usize().unwrap(), 5);
		assert_eq!(ConfigurationValue::Number(2.5).as_f64().unwrap(), 2.5);
		assert!(ConfigurationValue::Number(-1.0).as_usize().is_err());
		assert_eq!(ConfigurationValue::Literal("tornado".to_string()).as_str().unwrap(), "tornado");
		assert!(ConfigurationValue::True.as_bool().unwrap());
		assert!(ConfigurationValue::Literal("x".to_string()).as_f64().is_err());
	}
	#[test]
	fn object_matching()
	{
		let cv = ConfigurationValue::Object("Thing".to_string(),vec![
			("amount".to_string(),ConfigurationValue::Number(3.0)),
		]);
		let mut amount = None;
		match_object_panic!(&cv,"Thing",value,
			"amount" => amount = Some(value.as_usize().expect("bad amount")),
		);
		assert_eq!(amount, Some(3));
	}
	#[test]
	#[should_panic]
	fn object_matching_rejects_unknown_fields()
	{
		let cv = ConfigurationValue::Object("Thing".to_string(),vec![
			("nonsense".to_string(),ConfigurationValue::True),
		]);
		match_object_panic!(&cv,"Thing",_value,);
	}
}
