mod form_flow;
mod rut_vectors;
