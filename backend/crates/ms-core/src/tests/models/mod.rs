mod money;
mod order;
mod status;
