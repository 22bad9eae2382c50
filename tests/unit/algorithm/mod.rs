mod search;
mod timeout;
