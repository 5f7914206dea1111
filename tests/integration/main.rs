mod mocks;

mod mirror_run;
mod resolve_group;
