/*!

Selection of long-range links.

A long-range link is a direct wire between two non-adjacent routers, added to shortcut demand.
Candidate pairs form a matching (each router carries at most one such link) and the total
Euclidean length of the committed wires is bounded by a budget.

Two strategies are provided: a best-effort greedy search committing the pair of greatest
demand-weighted hop saving per unit of length, and a random sampler drawing a fixed number of
candidate pairs from a caller-seeded generator.

*/

use ::rand::{Rng,rngs::StdRng};
use itertools::Itertools;

use quantifiable_derive::Quantifiable;//the derive macro
use crate::topology::cartesian::CartesianData;
use crate::traffic::TrafficMatrix;

///How many pairs the random strategy draws. Every draw consumes one attempt, committed or not.
const RANDOM_SAMPLING_ATTEMPTS: usize = 10;

///The pairing of routers by long-range links: a partial involution without fixed points.
///Built once per topology construction and immutable thereafter.
#[derive(Debug,Quantifiable)]
pub struct Matching
{
	///`to[i]` is the partner of router `i`, if any.
	to: Vec<Option<usize>>,
	///The committed pairs, in commitment order.
	pairs: Vec<(usize,usize)>,
}

impl Matching
{
	pub fn new(router_count:usize) -> Matching
	{
		Matching{
			to: vec![None;router_count],
			pairs: vec![],
		}
	}
	pub fn partner(&self, router_index:usize) -> Option<usize>
	{
		self.to[router_index]
	}
	pub fn is_matched(&self, router_index:usize) -> bool
	{
		self.to[router_index].is_some()
	}
	pub fn pairs(&self) -> &[(usize,usize)]
	{
		&self.pairs
	}
	///Pair two unmatched routers. The matching stays symmetric and injective.
	pub fn commit(&mut self, a:usize, b:usize)
	{
		assert!(a!=b,"cannot pair router {} with itself",a);
		assert!(self.to[a].is_none() && self.to[b].is_none(),"routers {} and {} must both be unpaired",a,b);
		self.to[a] = Some(b);
		self.to[b] = Some(a);
		self.pairs.push((a,b));
	}
}

///The wire length still available. Only decreases, and only by lengths it covers.
#[derive(Debug)]
pub struct Budget
{
	remaining: f64,
}

impl Budget
{
	pub fn new(initial:f64) -> Budget
	{
		Budget{remaining:initial}
	}
	pub fn remaining(&self) -> f64
	{
		self.remaining
	}
	pub fn covers(&self, length:f64) -> bool
	{
		length <= self.remaining
	}
	pub fn spend(&mut self, length:f64)
	{
		assert!(self.covers(length),"spending {} with only {} remaining",length,self.remaining);
		self.remaining -= length;
	}
}

///The strategy deciding which long-range links to add.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum LinkSelection
{
	///Greedy search for the best demand-weighted saving per unit of wire.
	BestEffort,
	///A fixed number of uniformly random candidate draws.
	Random,
}

///Demand-weighted average hop counts without and with the selected links.
#[derive(Clone,Debug)]
pub struct BenefitReport
{
	///Demand-weighted Manhattan distance of the unaugmented grid.
	pub baseline: f64,
	///The same sum when sources may take their long-range link first.
	pub achieved: f64,
}

impl BenefitReport
{
	///Fraction of the baseline saved by the selected links.
	pub fn improvement(&self) -> f64
	{
		if self.baseline==0.0 { 0.0 } else { 1.0 - self.achieved/self.baseline }
	}
}

///The demand-weighted hop saving of wiring `i` to `j`: for every destination `k`, demand from
///either end saves the hops beyond reaching the other end plus the single hop over the new wire.
fn pair_benefit(traffic:&TrafficMatrix, space:&CartesianData, i:usize, j:usize) -> f64
{
	let n = space.size;
	let mut benefit = 0.0;
	for k in 0..n
	{
		let from_i = space.manhattan_distance(i,k) as isize;
		let from_j = space.manhattan_distance(j,k) as isize;
		let saved_from_j = from_j - from_i - 1;
		if saved_from_j > 0
		{
			benefit += traffic.amount(j,k) * saved_from_j as f64;
		}
		let saved_from_i = from_i - from_j - 1;
		if saved_from_i > 0
		{
			benefit += traffic.amount(i,k) * saved_from_i as f64;
		}
	}
	benefit
}

///Greedy selection: while some budget remains, rescan every unmatched pair and commit the one of
///strictly greatest benefit per unit of length. The full rescan each round is intentional; its
///stable `i<j` order breaks score ties towards the lowest pair.
fn best_effort_links(traffic:&TrafficMatrix, space:&CartesianData, budget:&mut Budget) -> Matching
{
	let n = space.size;
	let mut matching = Matching::new(n);
	while budget.remaining() > 0.0
	{
		let mut best_score = 0.0;
		let mut winner:Option<(usize,usize,f64)> = None;
		for (i,j) in (0..n).tuple_combinations()
		{
			if matching.is_matched(i) || matching.is_matched(j)
			{
				continue;
			}
			let length = space.euclidean_distance(i,j);
			if !budget.covers(length)
			{
				continue;
			}
			let score = pair_benefit(traffic,space,i,j) / length;
			if score > best_score
			{
				best_score = score;
				winner = Some((i,j,length));
			}
		}
		match winner
		{
			None => break,
			Some((i,j,length)) =>
			{
				println!("long-range link {} -- {} scoring {}",i,j,best_score);
				matching.commit(i,j);
				budget.spend(length);
			},
		}
	}
	matching
}

///Random selection: a fixed number of uniform draws, committing those that join two unmatched,
///non-adjacent routers within the remaining budget.
fn random_links(space:&CartesianData, budget:&mut Budget, rng:&mut StdRng) -> Matching
{
	let n = space.size;
	let mut matching = Matching::new(n);
	for _attempt in 0..RANDOM_SAMPLING_ATTEMPTS
	{
		let i = rng.gen_range(0..n);
		let j = rng.gen_range(0..n);
		let length = space.euclidean_distance(i,j);
		if length <= 1.0
		{
			//already adjacent, or the same router
			continue;
		}
		if matching.is_matched(i) || matching.is_matched(j) || !budget.covers(length)
		{
			continue;
		}
		println!("long-range link {} -- {} drawn at random",i,j);
		matching.commit(i,j);
		budget.spend(length);
	}
	matching
}

///Demand-weighted distances without and with the matching. A source with a partner may pay one
///hop to its partner and continue from there whenever that is shorter.
pub fn benefit_report(traffic:&TrafficMatrix, space:&CartesianData, matching:&Matching) -> BenefitReport
{
	let n = space.size;
	let mut baseline = 0.0;
	let mut achieved = 0.0;
	for i in 0..n
	{
		for j in 0..n
		{
			let direct = space.manhattan_distance(i,j) as f64;
			let amount = traffic.amount(i,j);
			baseline += amount * direct;
			achieved += amount * match matching.partner(i)
			{
				Some(partner) => direct.min(1.0 + space.manhattan_distance(partner,j) as f64),
				None => direct,
			};
		}
	}
	BenefitReport{baseline,achieved}
}

///Run the configured selection strategy over the whole budget and report the demand-weighted
///saving of the result.
pub fn select_links(selection:LinkSelection, traffic:&TrafficMatrix, space:&CartesianData, initial_budget:f64, rng:&mut StdRng) -> (Matching,BenefitReport)
{
	let mut budget = Budget::new(initial_budget);
	let matching = match selection
	{
		LinkSelection::BestEffort => best_effort_links(traffic,space,&mut budget),
		LinkSelection::Random => random_links(space,&mut budget,rng),
	};
	let report = benefit_report(traffic,space,&matching);
	println!("selected pairs {:?}",matching.pairs());
	println!("base distance {} reduced distance {} improvement {}",report.baseline,report.achieved,report.improvement());
	(matching,report)
}
