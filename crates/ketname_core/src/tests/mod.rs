mod suggest_name;
