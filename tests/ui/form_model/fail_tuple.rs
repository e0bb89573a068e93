#[derive(formstate::form::FormModel)]
#[allow(dead_code)]
struct TupleForm(String, bool);

fn main() {}
