#[cfg(test)]
pub mod common;

#[cfg(test)]
mod test_damage_pipeline;



#[cfg(test)]
mod test_stat_moves;


#[cfg(test)]
mod test_action_prevention;





#[cfg(test)]
mod test_runner;
