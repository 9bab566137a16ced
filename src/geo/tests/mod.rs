mod test_geodesy_basic;
mod test_label_basic;
