
mod introspect;
mod temporal;
